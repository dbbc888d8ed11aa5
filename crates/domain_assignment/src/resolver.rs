//! Assignment resolution
//!
//! Answers "which agents earn commission on this invoice". An exclusive
//! assignment short-circuits to a single agent; otherwise every matching
//! assignment contributes, ordered by priority and recency.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use core_kernel::{AgentId, CompanyCode, CustomerId, Territory};

use crate::assignment::{AssignmentStatus, CustomerAssignment};
use crate::error::AssignmentError;

/// One agent entitled to commission on an invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEntitlement {
    pub agent: AgentId,
    /// Percentage override from the assignment, Percentage rules only
    pub override_percentage: Option<Decimal>,
}

/// An in-memory collection of customer assignments
#[derive(Debug, Clone, Default)]
pub struct AssignmentBook {
    assignments: Vec<CustomerAssignment>,
}

impl AssignmentBook {
    pub fn new() -> Self {
        Self {
            assignments: Vec::new(),
        }
    }

    /// Adds an assignment after validating it and checking exclusivity:
    /// a customer may hold at most one active exclusive assignment per
    /// company over any date.
    pub fn insert(&mut self, assignment: CustomerAssignment) -> Result<(), AssignmentError> {
        assignment.validate()?;
        if assignment.is_exclusive && assignment.status == AssignmentStatus::Active {
            if let Some(existing) = self.assignments.iter().find(|a| {
                a.is_exclusive
                    && a.status == AssignmentStatus::Active
                    && a.customer == assignment.customer
                    && a.company == assignment.company
                    && a.window.overlaps(&assignment.window)
            }) {
                return Err(AssignmentError::ExclusiveConflict {
                    existing: existing.id.to_string(),
                });
            }
        }
        self.assignments.push(assignment);
        Ok(())
    }

    pub fn assignments(&self) -> &[CustomerAssignment] {
        &self.assignments
    }

    /// Resolves the agents entitled to commission on an invoice.
    ///
    /// When an exclusive assignment matches, only its agent is returned.
    /// Otherwise all matching agents are returned, ordered by priority
    /// descending, then by effective-from descending.
    pub fn applicable_agents(
        &self,
        customer: &CustomerId,
        territory: Option<&Territory>,
        company: &CompanyCode,
        date: NaiveDate,
    ) -> Vec<AgentEntitlement> {
        let mut matching: Vec<&CustomerAssignment> = self
            .assignments
            .iter()
            .filter(|a| a.applies_to(customer, territory, company, date))
            .collect();

        if let Some(exclusive) = matching.iter().find(|a| a.is_exclusive) {
            return vec![AgentEntitlement {
                agent: exclusive.agent,
                override_percentage: exclusive.override_percentage,
            }];
        }

        matching.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.window.from.cmp(&a.window.from))
        });
        matching
            .into_iter()
            .map(|a| AgentEntitlement {
                agent: a.agent,
                override_percentage: a.override_percentage,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::EffectiveWindow;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assignment(customer: CustomerId, from: NaiveDate) -> CustomerAssignment {
        CustomerAssignment::new(
            AgentId::new(),
            customer,
            CompanyCode::from("ACME"),
            EffectiveWindow::open(from),
        )
    }

    #[test]
    fn test_exclusive_short_circuits() {
        let customer = CustomerId::new();
        let mut book = AssignmentBook::new();
        let plain = assignment(customer, date(2024, 1, 1)).with_priority(10);
        let exclusive = assignment(customer, date(2024, 1, 1)).exclusive();
        let exclusive_agent = exclusive.agent;
        book.insert(plain).unwrap();
        book.insert(exclusive).unwrap();

        let agents = book.applicable_agents(
            &customer,
            None,
            &CompanyCode::from("ACME"),
            date(2024, 3, 1),
        );
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].agent, exclusive_agent);
    }

    #[test]
    fn test_second_overlapping_exclusive_rejected() {
        let customer = CustomerId::new();
        let mut book = AssignmentBook::new();
        book.insert(assignment(customer, date(2024, 1, 1)).exclusive())
            .unwrap();

        let second = assignment(customer, date(2024, 6, 1)).exclusive();
        assert!(matches!(
            book.insert(second),
            Err(AssignmentError::ExclusiveConflict { .. })
        ));
    }

    #[test]
    fn test_non_overlapping_exclusives_allowed() {
        let customer = CustomerId::new();
        let mut book = AssignmentBook::new();
        let mut first = assignment(customer, date(2024, 1, 1)).exclusive();
        first.window = EffectiveWindow::bounded(date(2024, 1, 1), date(2024, 6, 30)).unwrap();
        book.insert(first).unwrap();
        book.insert(assignment(customer, date(2024, 7, 1)).exclusive())
            .unwrap();
    }

    #[test]
    fn test_priority_then_recency_ordering() {
        let customer = CustomerId::new();
        let mut book = AssignmentBook::new();
        let low = assignment(customer, date(2024, 1, 1)).with_priority(1);
        let high = assignment(customer, date(2024, 1, 1)).with_priority(5);
        let recent = assignment(customer, date(2024, 4, 1)).with_priority(5);
        let (low_id, high_id, recent_id) = (low.agent, high.agent, recent.agent);
        book.insert(low).unwrap();
        book.insert(high).unwrap();
        book.insert(recent).unwrap();

        let agents = book.applicable_agents(
            &customer,
            None,
            &CompanyCode::from("ACME"),
            date(2024, 6, 1),
        );
        let order: Vec<AgentId> = agents.iter().map(|e| e.agent).collect();
        assert_eq!(order, vec![recent_id, high_id, low_id]);
    }

    #[test]
    fn test_override_carried_through() {
        let customer = CustomerId::new();
        let mut book = AssignmentBook::new();
        book.insert(assignment(customer, date(2024, 1, 1)).with_override(dec!(12.5)))
            .unwrap();

        let agents = book.applicable_agents(
            &customer,
            None,
            &CompanyCode::from("ACME"),
            date(2024, 2, 1),
        );
        assert_eq!(agents[0].override_percentage, Some(dec!(12.5)));
    }

    #[test]
    fn test_no_match_returns_empty() {
        let book = AssignmentBook::new();
        assert!(book
            .applicable_agents(
                &CustomerId::new(),
                None,
                &CompanyCode::from("ACME"),
                date(2024, 1, 1),
            )
            .is_empty());
    }
}
