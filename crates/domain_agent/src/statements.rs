//! Commission statement rendering
//!
//! Builds the subject and plain-text body for the periodic statements
//! delivered through the notification port. The numbers arrive
//! pre-aggregated from the settlement reports; this module only formats.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::agent::SalesAgent;

/// One line of a commission statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLine {
    pub description: String,
    pub amount: Decimal,
}

/// A rendered commission statement for one agent and period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionStatement {
    pub agent_name: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub entry_count: usize,
    pub lines: Vec<StatementLine>,
    pub total_amount: Decimal,
}

impl CommissionStatement {
    /// Builds a statement from period aggregates
    pub fn new(
        agent: &SalesAgent,
        from_date: NaiveDate,
        to_date: NaiveDate,
        entry_count: usize,
        pending_amount: Decimal,
        due_amount: Decimal,
        paid_amount: Decimal,
    ) -> Self {
        let total_amount = pending_amount + due_amount + paid_amount;
        Self {
            agent_name: agent.agent_name.clone(),
            from_date,
            to_date,
            entry_count,
            lines: vec![
                StatementLine {
                    description: "Pending (invoice not paid)".to_string(),
                    amount: pending_amount,
                },
                StatementLine {
                    description: "Due for payment".to_string(),
                    amount: due_amount,
                },
                StatementLine {
                    description: "Already paid".to_string(),
                    amount: paid_amount,
                },
            ],
            total_amount,
        }
    }

    /// Email subject line
    pub fn subject(&self) -> String {
        format!("Commission Statement - {}", self.agent_name)
    }

    /// Plain-text email body
    pub fn body(&self) -> String {
        let mut body = format!(
            "Dear {},\n\nPlease find your commission statement for the period {} to {}.\n\n\
             Commission entries: {}\n",
            self.agent_name, self.from_date, self.to_date, self.entry_count
        );
        for line in &self.lines {
            body.push_str(&format!("{}: {:.2}\n", line.description, line.amount));
        }
        body.push_str(&format!("Total commission: {:.2}\n", self.total_amount));
        body.push_str("\nThank you for your continued partnership.\n");
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::CompanyCode;
    use rust_decimal_macros::dec;

    #[test]
    fn test_statement_rendering() {
        let agent = SalesAgent::new(
            "AGT-0001",
            "Jordan Reyes",
            CompanyCode::from("ACME"),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        );
        let statement = CommissionStatement::new(
            &agent,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            4,
            dec!(120.00),
            dec!(80.00),
            dec!(300.00),
        );

        assert_eq!(statement.total_amount, dec!(500.00));
        assert_eq!(statement.subject(), "Commission Statement - Jordan Reyes");

        let body = statement.body();
        assert!(body.contains("2024-03-01"));
        assert!(body.contains("Due for payment: 80.00"));
        assert!(body.contains("Total commission: 500.00"));
    }
}
