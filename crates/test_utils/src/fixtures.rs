//! Canned scenarios shared across integration tests

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::CustomerId;
use domain_agent::{AgentDirectory, SalesAgent};
use domain_assignment::AssignmentBook;
use domain_rules::RuleSet;

use crate::builders::{AgentBuilder, AssignmentBuilder, RuleBuilder};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One active agent assigned to one customer with a 10% rule on the
/// Electronics item group. Returns the agent alongside the loaded state.
pub fn percentage_scenario(
    customer: CustomerId,
) -> (SalesAgent, AgentDirectory, AssignmentBook, RuleSet) {
    let agent = AgentBuilder::new().email("agent@example.com").build();

    let mut directory = AgentDirectory::new();
    directory.insert(agent.clone());

    let mut book = AssignmentBook::new();
    book.insert(AssignmentBuilder::new(agent.id, customer).build())
        .expect("assignment fixture is valid");

    let mut rules = RuleSet::new();
    rules
        .insert(RuleBuilder::percentage(agent.id, "Electronics", dec!(10)).build())
        .expect("rule fixture is valid");

    (agent, directory, book, rules)
}
