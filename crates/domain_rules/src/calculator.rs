//! Commission calculation
//!
//! Pure decimal arithmetic over a resolved rate and one invoice line.
//! Money wrapping and currency handling live with the caller.

use rust_decimal::Decimal;

use crate::resolver::ResolvedRate;
use crate::rule::CalculationMethod;

/// The slice of an invoice line the calculator needs
#[derive(Debug, Clone, Copy)]
pub struct LineInput {
    pub qty: Decimal,
    pub base_amount: Decimal,
}

/// Computes the commission for one invoice line under a resolved rate.
///
/// A non-positive base (or non-positive quantity for the fixed method)
/// yields zero before any clamping, so a minimum bound never manufactures
/// commission out of a worthless line.
pub fn calculate_commission(rate: &ResolvedRate, line: &LineInput) -> Decimal {
    let raw = match rate.method {
        CalculationMethod::Percentage => {
            if line.base_amount <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            line.base_amount * rate.commission_percentage / Decimal::ONE_HUNDRED
        }
        CalculationMethod::FixedAmount => {
            if line.qty <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            rate.fixed_amount * line.qty
        }
        CalculationMethod::Tiered => {
            if line.base_amount <= Decimal::ZERO {
                return Decimal::ZERO;
            }
            match &rate.tiers {
                Some(schedule) => schedule.marginal_commission(line.base_amount),
                None => Decimal::ZERO,
            }
        }
        // Computed outside this pipeline; nothing accrues here.
        CalculationMethod::Custom => return Decimal::ZERO,
    };
    clamp(raw, rate.minimum_amount, rate.maximum_amount).round_dp(4)
}

/// Applies the floor, then the cap. When the floor sits above the cap the
/// cap wins, keeping the result inside the configured maximum.
fn clamp(amount: Decimal, minimum: Option<Decimal>, maximum: Option<Decimal>) -> Decimal {
    let mut result = amount;
    if let Some(min) = minimum {
        if result < min {
            result = min;
        }
    }
    if let Some(max) = maximum {
        if result > max {
            result = max;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::tiers::{TierRate, TierSchedule};

    fn rate(method: CalculationMethod) -> ResolvedRate {
        ResolvedRate {
            rule_id: core_kernel::RuleId::new(),
            method,
            commission_percentage: Decimal::ZERO,
            fixed_amount: Decimal::ZERO,
            tiers: None,
            minimum_amount: None,
            maximum_amount: None,
        }
    }

    fn line(qty: Decimal, base: Decimal) -> LineInput {
        LineInput {
            qty,
            base_amount: base,
        }
    }

    #[test]
    fn test_percentage() {
        let mut r = rate(CalculationMethod::Percentage);
        r.commission_percentage = dec!(10);
        assert_eq!(calculate_commission(&r, &line(dec!(1), dec!(1000))), dec!(100));
    }

    #[test]
    fn test_fixed_amount_scales_with_qty() {
        let mut r = rate(CalculationMethod::FixedAmount);
        r.fixed_amount = dec!(25);
        assert_eq!(calculate_commission(&r, &line(dec!(4), dec!(9999))), dec!(100));
        assert_eq!(calculate_commission(&r, &line(dec!(0), dec!(9999))), dec!(0));
    }

    #[test]
    fn test_tiered_marginal() {
        let mut r = rate(CalculationMethod::Tiered);
        r.tiers = Some(
            TierSchedule::new(vec![
                TierRate::new(dec!(0), Some(dec!(1000)), dec!(5)),
                TierRate::new(dec!(1000), None, dec!(8)),
            ])
            .unwrap(),
        );
        assert_eq!(calculate_commission(&r, &line(dec!(1), dec!(1500))), dec!(90));
    }

    #[test]
    fn test_minimum_clamp() {
        let mut r = rate(CalculationMethod::Percentage);
        r.commission_percentage = dec!(5);
        r.minimum_amount = Some(dec!(100));
        r.maximum_amount = Some(dec!(500));
        // 5% of 1000 = 50, raised to the floor
        assert_eq!(calculate_commission(&r, &line(dec!(1), dec!(1000))), dec!(100));
    }

    #[test]
    fn test_maximum_clamp() {
        let mut r = rate(CalculationMethod::Percentage);
        r.commission_percentage = dec!(5);
        r.minimum_amount = Some(dec!(100));
        r.maximum_amount = Some(dec!(500));
        // 5% of 12000 = 600, capped
        assert_eq!(calculate_commission(&r, &line(dec!(1), dec!(12000))), dec!(500));
    }

    #[test]
    fn test_zero_base_skips_minimum() {
        let mut r = rate(CalculationMethod::Percentage);
        r.commission_percentage = dec!(10);
        r.minimum_amount = Some(dec!(100));
        assert_eq!(calculate_commission(&r, &line(dec!(1), dec!(0))), dec!(0));
        assert_eq!(calculate_commission(&r, &line(dec!(1), dec!(-200))), dec!(0));
    }

    #[test]
    fn test_custom_method_yields_zero() {
        let r = rate(CalculationMethod::Custom);
        assert_eq!(calculate_commission(&r, &line(dec!(1), dec!(1000))), dec!(0));
    }
}
