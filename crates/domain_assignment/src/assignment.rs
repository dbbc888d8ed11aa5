//! Customer assignment record

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, AssignmentId, CompanyCode, CustomerId, EffectiveWindow, Territory};

use crate::error::AssignmentError;

/// Assignment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    Active,
    Inactive,
}

/// Maps an agent to a customer over an effective window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAssignment {
    pub id: AssignmentId,
    pub agent: AgentId,
    pub customer: CustomerId,
    /// When set, the assignment applies only to invoices in this territory
    pub territory: Option<Territory>,
    pub company: CompanyCode,
    pub window: EffectiveWindow,
    /// Higher priority wins among non-exclusive assignments
    pub priority: i32,
    /// An exclusive assignment suppresses all others for the customer
    pub is_exclusive: bool,
    /// Replaces the rule's percentage for this customer, Percentage method only
    pub override_percentage: Option<Decimal>,
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
}

impl CustomerAssignment {
    pub fn new(
        agent: AgentId,
        customer: CustomerId,
        company: CompanyCode,
        window: EffectiveWindow,
    ) -> Self {
        Self {
            id: AssignmentId::new_v7(),
            agent,
            customer,
            territory: None,
            company,
            window,
            priority: 0,
            is_exclusive: false,
            override_percentage: None,
            status: AssignmentStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn with_territory(mut self, territory: Territory) -> Self {
        self.territory = Some(territory);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.is_exclusive = true;
        self
    }

    pub fn with_override(mut self, percentage: Decimal) -> Self {
        self.override_percentage = Some(percentage);
        self
    }

    /// Validates priority and override bounds
    pub fn validate(&self) -> Result<(), AssignmentError> {
        if self.priority < 0 {
            return Err(AssignmentError::NegativePriority(self.priority));
        }
        if let Some(pct) = self.override_percentage {
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(AssignmentError::OverrideOutOfRange(pct));
            }
        }
        Ok(())
    }

    /// Returns true if the assignment is in force for the invoice context.
    /// A territory-scoped assignment requires a matching invoice territory.
    pub fn applies_to(
        &self,
        customer: &CustomerId,
        territory: Option<&Territory>,
        company: &CompanyCode,
        date: chrono::NaiveDate,
    ) -> bool {
        if self.status != AssignmentStatus::Active
            || &self.customer != customer
            || &self.company != company
            || !self.window.contains(date)
        {
            return false;
        }
        match (&self.territory, territory) {
            (None, _) => true,
            (Some(scoped), Some(actual)) => scoped == actual,
            (Some(_), None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assignment() -> CustomerAssignment {
        CustomerAssignment::new(
            AgentId::new(),
            CustomerId::new(),
            CompanyCode::from("ACME"),
            EffectiveWindow::open(date(2024, 1, 1)),
        )
    }

    #[test]
    fn test_validate_rejects_bad_override() {
        let a = assignment().with_override(dec!(150));
        assert!(matches!(
            a.validate(),
            Err(AssignmentError::OverrideOutOfRange(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_priority() {
        let a = assignment().with_priority(-1);
        assert!(matches!(
            a.validate(),
            Err(AssignmentError::NegativePriority(-1))
        ));
    }

    #[test]
    fn test_territory_scoping() {
        let a = assignment().with_territory(Territory::from("West"));
        let customer = a.customer;
        let company = CompanyCode::from("ACME");
        let on = date(2024, 3, 1);

        assert!(a.applies_to(&customer, Some(&Territory::from("West")), &company, on));
        assert!(!a.applies_to(&customer, Some(&Territory::from("East")), &company, on));
        assert!(!a.applies_to(&customer, None, &company, on));
    }

    #[test]
    fn test_unscoped_assignment_matches_any_territory() {
        let a = assignment();
        let customer = a.customer;
        let company = CompanyCode::from("ACME");
        let on = date(2024, 3, 1);

        assert!(a.applies_to(&customer, Some(&Territory::from("East")), &company, on));
        assert!(a.applies_to(&customer, None, &company, on));
    }

    #[test]
    fn test_window_and_status_gate() {
        let mut a = assignment();
        let customer = a.customer;
        let company = CompanyCode::from("ACME");

        assert!(!a.applies_to(&customer, None, &company, date(2023, 12, 31)));

        a.status = AssignmentStatus::Inactive;
        assert!(!a.applies_to(&customer, None, &company, date(2024, 3, 1)));
    }
}
