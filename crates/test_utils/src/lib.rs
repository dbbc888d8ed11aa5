//! Shared builders and fixtures for tests across the workspace

pub mod builders;
pub mod fixtures;

pub use builders::{AgentBuilder, AssignmentBuilder, InvoiceBuilder, RuleBuilder};
pub use fixtures::{date, percentage_scenario};
