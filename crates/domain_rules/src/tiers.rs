//! Tier schedules for marginal commission
//!
//! A tier schedule splits the invoice base amount into brackets, each with
//! its own percentage. Commission is marginal: each bracket earns its rate
//! only on the slice of the base that falls inside it, the way progressive
//! tax brackets work.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// One bracket of a tier schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRate {
    /// Inclusive lower bound of the bracket
    pub from_amount: Decimal,
    /// Exclusive upper bound, None for the open top bracket
    pub to_amount: Option<Decimal>,
    /// Percentage applied to the slice of the base inside this bracket
    pub commission_percentage: Decimal,
}

impl TierRate {
    pub fn new(from_amount: Decimal, to_amount: Option<Decimal>, percentage: Decimal) -> Self {
        Self {
            from_amount,
            to_amount,
            commission_percentage: percentage,
        }
    }
}

/// A validated, ordered set of tier brackets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSchedule {
    tiers: Vec<TierRate>,
}

impl TierSchedule {
    /// Builds a schedule, sorting brackets by lower bound and validating
    /// that they do not overlap and only the last is open-ended.
    pub fn new(mut tiers: Vec<TierRate>) -> Result<Self, RuleError> {
        if tiers.is_empty() {
            return Err(RuleError::EmptyTiers);
        }
        tiers.sort_by(|a, b| a.from_amount.cmp(&b.from_amount));

        for (idx, tier) in tiers.iter().enumerate() {
            if tier.from_amount < Decimal::ZERO {
                return Err(RuleError::NegativeTierBound(tier.from_amount));
            }
            if tier.commission_percentage < Decimal::ZERO
                || tier.commission_percentage > Decimal::ONE_HUNDRED
            {
                return Err(RuleError::PercentageOutOfRange(tier.commission_percentage));
            }
            match tier.to_amount {
                Some(to) if to <= tier.from_amount => {
                    return Err(RuleError::InvertedTier {
                        from: tier.from_amount,
                        to,
                    });
                }
                None if idx + 1 < tiers.len() => return Err(RuleError::OpenTierNotLast),
                _ => {}
            }
            if idx > 0 {
                // Sorted by from_amount, so only adjacent pairs can overlap.
                let prev = &tiers[idx - 1];
                match prev.to_amount {
                    Some(prev_to) if prev_to > tier.from_amount => {
                        return Err(RuleError::OverlappingTiers(tier.from_amount));
                    }
                    _ => {}
                }
            }
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[TierRate] {
        &self.tiers
    }

    /// Computes the marginal commission on a base amount.
    ///
    /// Each bracket contributes its percentage of the overlap between the
    /// bracket and `[0, base)`. Amounts above the last bounded bracket earn
    /// nothing unless an open-ended bracket covers them.
    pub fn marginal_commission(&self, base: Decimal) -> Decimal {
        if base <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let mut total = Decimal::ZERO;
        for tier in &self.tiers {
            if tier.from_amount >= base {
                break;
            }
            let upper = match tier.to_amount {
                Some(to) => base.min(to),
                None => base,
            };
            let slice = upper - tier.from_amount;
            total += slice * tier.commission_percentage / Decimal::ONE_HUNDRED;
        }
        total.round_dp(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn two_bracket() -> TierSchedule {
        TierSchedule::new(vec![
            TierRate::new(dec!(0), Some(dec!(1000)), dec!(5)),
            TierRate::new(dec!(1000), None, dec!(8)),
        ])
        .unwrap()
    }

    #[test]
    fn test_marginal_spans_brackets() {
        // 1000 at 5% + 500 at 8%
        assert_eq!(two_bracket().marginal_commission(dec!(1500)), dec!(90));
    }

    #[test]
    fn test_base_inside_first_bracket() {
        assert_eq!(two_bracket().marginal_commission(dec!(400)), dec!(20));
    }

    #[test]
    fn test_base_at_bracket_boundary() {
        assert_eq!(two_bracket().marginal_commission(dec!(1000)), dec!(50));
    }

    #[test]
    fn test_zero_and_negative_base() {
        assert_eq!(two_bracket().marginal_commission(dec!(0)), dec!(0));
        assert_eq!(two_bracket().marginal_commission(dec!(-50)), dec!(0));
    }

    #[test]
    fn test_gap_above_bounded_schedule_earns_nothing() {
        let schedule =
            TierSchedule::new(vec![TierRate::new(dec!(0), Some(dec!(100)), dec!(10))]).unwrap();
        // Only the first 100 is covered.
        assert_eq!(schedule.marginal_commission(dec!(250)), dec!(10));
    }

    #[test]
    fn test_rejects_overlapping_tiers() {
        let result = TierSchedule::new(vec![
            TierRate::new(dec!(0), Some(dec!(500)), dec!(5)),
            TierRate::new(dec!(400), None, dec!(8)),
        ]);
        assert!(matches!(result, Err(RuleError::OverlappingTiers(_))));
    }

    #[test]
    fn test_rejects_open_tier_in_middle() {
        let result = TierSchedule::new(vec![
            TierRate::new(dec!(0), None, dec!(5)),
            TierRate::new(dec!(1000), Some(dec!(2000)), dec!(8)),
        ]);
        assert!(matches!(result, Err(RuleError::OpenTierNotLast)));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let result = TierSchedule::new(vec![TierRate::new(dec!(500), Some(dec!(100)), dec!(5))]);
        assert!(matches!(result, Err(RuleError::InvertedTier { .. })));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            TierSchedule::new(Vec::new()),
            Err(RuleError::EmptyTiers)
        ));
    }
}
