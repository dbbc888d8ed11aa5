//! Sales agent master record

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, CompanyCode};

use crate::error::AgentError;

/// Agent status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentStatus {
    Active,
    Inactive,
    Suspended,
    Terminated,
}

/// How often the agent receives commission statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementFrequency {
    Weekly,
    Monthly,
    Quarterly,
}

/// A sales agent earning commission on invoices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesAgent {
    /// Unique identifier
    pub id: AgentId,
    /// Human-readable agent code
    pub agent_code: String,
    /// Display name
    pub agent_name: String,
    /// Contact email for statements and alerts
    pub email: Option<String>,
    /// Company the agent sells for
    pub company: CompanyCode,
    /// Status
    pub status: AgentStatus,
    /// Master switch for commission accrual
    pub enable_commission: bool,
    /// Commission becomes due only once the invoice is (partially) paid
    pub commission_on_payment: bool,
    /// Entries are created automatically on invoice submission
    pub auto_create_entries: bool,
    /// Agent receives periodic commission statements
    pub send_statements: bool,
    /// Statement cadence
    pub statement_frequency: StatementFrequency,
    /// Date the agent joined
    pub joining_date: NaiveDate,
    /// Termination date, required when status is Terminated
    pub termination_date: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl SalesAgent {
    /// Creates a new active agent with commission enabled
    pub fn new(
        agent_code: impl Into<String>,
        agent_name: impl Into<String>,
        company: CompanyCode,
        joining_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AgentId::new_v7(),
            agent_code: agent_code.into(),
            agent_name: agent_name.into(),
            email: None,
            company,
            status: AgentStatus::Active,
            enable_commission: true,
            commission_on_payment: true,
            auto_create_entries: true,
            send_statements: false,
            statement_frequency: StatementFrequency::Weekly,
            joining_date,
            termination_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Opts the agent into periodic statements
    pub fn with_statements(mut self, frequency: StatementFrequency) -> Self {
        self.send_statements = true;
        self.statement_frequency = frequency;
        self
    }

    /// Validates the master record
    pub fn validate(&self) -> Result<(), AgentError> {
        if let Some(termination) = self.termination_date {
            if self.joining_date > termination {
                return Err(AgentError::JoiningAfterTermination);
            }
        }
        if self.status == AgentStatus::Terminated && self.termination_date.is_none() {
            return Err(AgentError::MissingTerminationDate);
        }
        Ok(())
    }

    /// Returns true if the agent can accrue commission
    pub fn accrues_commission(&self) -> bool {
        self.status == AgentStatus::Active && self.enable_commission
    }

    /// Terminates the agent effective the given date
    pub fn terminate(&mut self, date: NaiveDate) -> Result<(), AgentError> {
        if date < self.joining_date {
            return Err(AgentError::JoiningAfterTermination);
        }
        self.status = AgentStatus::Terminated;
        self.termination_date = Some(date);
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> SalesAgent {
        SalesAgent::new(
            "AGT-0001",
            "Jordan Reyes",
            CompanyCode::from("ACME"),
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        )
    }

    #[test]
    fn test_new_agent_accrues_commission() {
        let a = agent();
        assert!(a.validate().is_ok());
        assert!(a.accrues_commission());
    }

    #[test]
    fn test_disabled_commission() {
        let mut a = agent();
        a.enable_commission = false;
        assert!(!a.accrues_commission());
    }

    #[test]
    fn test_terminated_requires_date() {
        let mut a = agent();
        a.status = AgentStatus::Terminated;
        assert!(matches!(
            a.validate(),
            Err(AgentError::MissingTerminationDate)
        ));

        a.terminate(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
            .unwrap();
        assert!(a.validate().is_ok());
        assert!(!a.accrues_commission());
    }

    #[test]
    fn test_termination_before_joining_rejected() {
        let mut a = agent();
        let before = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(a.terminate(before).is_err());
    }
}
