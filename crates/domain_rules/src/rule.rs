//! Commission rule aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, CompanyCode, EffectiveWindow, ItemGroup, RuleId};

use crate::error::RuleError;
use crate::tiers::TierSchedule;

/// How the commission amount is derived from an invoice line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// Flat percentage of the line base amount
    Percentage,
    /// Fixed amount per unit of quantity
    FixedAmount,
    /// Marginal tier brackets over the line base amount
    Tiered,
    /// Reserved for externally computed commission, always yields zero here
    Custom,
}

/// Rule lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatus {
    Active,
    Inactive,
}

/// Per-item-group rate parameters within a rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemGroupRate {
    pub item_group: ItemGroup,
    /// Used by the Percentage method
    pub commission_percentage: Decimal,
    /// Used by the FixedAmount method, per unit of quantity
    pub fixed_amount: Decimal,
    /// Used by the Tiered method
    pub tiers: Option<TierSchedule>,
}

impl ItemGroupRate {
    pub fn percentage(item_group: ItemGroup, percentage: Decimal) -> Self {
        Self {
            item_group,
            commission_percentage: percentage,
            fixed_amount: Decimal::ZERO,
            tiers: None,
        }
    }

    pub fn fixed(item_group: ItemGroup, amount_per_unit: Decimal) -> Self {
        Self {
            item_group,
            commission_percentage: Decimal::ZERO,
            fixed_amount: amount_per_unit,
            tiers: None,
        }
    }

    pub fn tiered(item_group: ItemGroup, tiers: TierSchedule) -> Self {
        Self {
            item_group,
            commission_percentage: Decimal::ZERO,
            fixed_amount: Decimal::ZERO,
            tiers: Some(tiers),
        }
    }
}

/// A commission rule for one agent and company over an effective window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRule {
    pub id: RuleId,
    pub agent: AgentId,
    pub company: CompanyCode,
    pub status: RuleStatus,
    pub method: CalculationMethod,
    pub window: EffectiveWindow,
    /// Floor applied to each line's commission after calculation
    pub minimum_amount: Option<Decimal>,
    /// Cap applied to each line's commission after calculation
    pub maximum_amount: Option<Decimal>,
    pub rates: Vec<ItemGroupRate>,
    pub created_at: DateTime<Utc>,
}

impl CommissionRule {
    pub fn new(
        agent: AgentId,
        company: CompanyCode,
        method: CalculationMethod,
        window: EffectiveWindow,
        rates: Vec<ItemGroupRate>,
    ) -> Self {
        Self {
            id: RuleId::new_v7(),
            agent,
            company,
            status: RuleStatus::Active,
            method,
            window,
            minimum_amount: None,
            maximum_amount: None,
            rates,
            created_at: Utc::now(),
        }
    }

    pub fn with_bounds(mut self, minimum: Option<Decimal>, maximum: Option<Decimal>) -> Self {
        self.minimum_amount = minimum;
        self.maximum_amount = maximum;
        self
    }

    /// Validates rate parameters and clamp bounds
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.rates.is_empty() {
            return Err(RuleError::NoRates);
        }
        if let (Some(min), Some(max)) = (self.minimum_amount, self.maximum_amount) {
            if min > max {
                return Err(RuleError::MinAboveMax);
            }
        }
        for (idx, rate) in self.rates.iter().enumerate() {
            if rate.commission_percentage < Decimal::ZERO
                || rate.commission_percentage > Decimal::ONE_HUNDRED
            {
                return Err(RuleError::PercentageOutOfRange(rate.commission_percentage));
            }
            if rate.fixed_amount < Decimal::ZERO {
                return Err(RuleError::NegativeFixedAmount(rate.fixed_amount));
            }
            if self
                .rates
                .iter()
                .take(idx)
                .any(|r| r.item_group == rate.item_group)
            {
                return Err(RuleError::DuplicateItemGroup(rate.item_group.to_string()));
            }
        }
        Ok(())
    }

    /// Looks up the rate row for an item group
    pub fn rate_for(&self, item_group: &ItemGroup) -> Option<&ItemGroupRate> {
        self.rates.iter().find(|r| &r.item_group == item_group)
    }

    /// Returns true if this rule's window overlaps another rule covering
    /// a shared item group for the same agent and company. Rules over
    /// disjoint item groups never conflict, so one agent can hold rules
    /// with different methods for different groups over the same dates.
    /// Status is not considered.
    pub fn conflicts_with(&self, other: &CommissionRule) -> bool {
        self.agent == other.agent
            && self.company == other.company
            && self.window.overlaps(&other.window)
            && self
                .rates
                .iter()
                .any(|r| other.rate_for(&r.item_group).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn window(from: (i32, u32, u32)) -> EffectiveWindow {
        EffectiveWindow::open(NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap())
    }

    fn rule(rates: Vec<ItemGroupRate>) -> CommissionRule {
        CommissionRule::new(
            AgentId::new(),
            CompanyCode::from("ACME"),
            CalculationMethod::Percentage,
            window((2024, 1, 1)),
            rates,
        )
    }

    #[test]
    fn test_validate_rejects_empty_rates() {
        assert!(matches!(rule(Vec::new()).validate(), Err(RuleError::NoRates)));
    }

    #[test]
    fn test_validate_rejects_out_of_range_percentage() {
        let r = rule(vec![ItemGroupRate::percentage(
            ItemGroup::from("Electronics"),
            dec!(120),
        )]);
        assert!(matches!(
            r.validate(),
            Err(RuleError::PercentageOutOfRange(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_item_group() {
        let r = rule(vec![
            ItemGroupRate::percentage(ItemGroup::from("Electronics"), dec!(5)),
            ItemGroupRate::percentage(ItemGroup::from("Electronics"), dec!(8)),
        ]);
        assert!(matches!(r.validate(), Err(RuleError::DuplicateItemGroup(_))));
    }

    #[test]
    fn test_validate_rejects_min_above_max() {
        let r = rule(vec![ItemGroupRate::percentage(
            ItemGroup::from("Electronics"),
            dec!(5),
        )])
        .with_bounds(Some(dec!(500)), Some(dec!(100)));
        assert!(matches!(r.validate(), Err(RuleError::MinAboveMax)));
    }

    #[test]
    fn test_conflict_requires_same_agent_and_company() {
        let agent = AgentId::new();
        let a = CommissionRule::new(
            agent,
            CompanyCode::from("ACME"),
            CalculationMethod::Percentage,
            window((2024, 1, 1)),
            vec![ItemGroupRate::percentage(ItemGroup::from("All"), dec!(5))],
        );
        let mut b = a.clone();
        b.id = RuleId::new();
        assert!(a.conflicts_with(&b));

        b.company = CompanyCode::from("OTHER");
        assert!(!a.conflicts_with(&b));
    }

    #[test]
    fn test_no_conflict_across_item_groups() {
        let agent = AgentId::new();
        let a = CommissionRule::new(
            agent,
            CompanyCode::from("ACME"),
            CalculationMethod::Percentage,
            window((2024, 1, 1)),
            vec![ItemGroupRate::percentage(ItemGroup::from("Electronics"), dec!(5))],
        );
        let mut b = a.clone();
        b.id = RuleId::new();
        b.rates = vec![ItemGroupRate::percentage(ItemGroup::from("Furniture"), dec!(8))];
        assert!(!a.conflicts_with(&b));

        // A shared group brings the conflict back
        b.rates.push(ItemGroupRate::percentage(ItemGroup::from("Electronics"), dec!(3)));
        assert!(a.conflicts_with(&b));
    }
}
