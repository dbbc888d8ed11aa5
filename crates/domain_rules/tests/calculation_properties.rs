//! Property tests for commission calculation

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::RuleId;
use domain_rules::{
    calculate_commission, CalculationMethod, LineInput, ResolvedRate, TierRate, TierSchedule,
};

fn percentage_rate(pct: Decimal) -> ResolvedRate {
    ResolvedRate {
        rule_id: RuleId::new(),
        method: CalculationMethod::Percentage,
        commission_percentage: pct,
        fixed_amount: Decimal::ZERO,
        tiers: None,
        minimum_amount: None,
        maximum_amount: None,
    }
}

fn tiered_rate() -> ResolvedRate {
    ResolvedRate {
        rule_id: RuleId::new(),
        method: CalculationMethod::Tiered,
        commission_percentage: Decimal::ZERO,
        fixed_amount: Decimal::ZERO,
        tiers: Some(
            TierSchedule::new(vec![
                TierRate::new(dec!(0), Some(dec!(1000)), dec!(5)),
                TierRate::new(dec!(1000), Some(dec!(5000)), dec!(8)),
                TierRate::new(dec!(5000), None, dec!(12)),
            ])
            .unwrap(),
        ),
        minimum_amount: None,
        maximum_amount: None,
    }
}

proptest! {
    #[test]
    fn percentage_commission_never_exceeds_base(
        base in 0i64..1_000_000,
        pct in 0i64..=100,
    ) {
        let rate = percentage_rate(Decimal::from(pct));
        let line = LineInput { qty: dec!(1), base_amount: Decimal::from(base) };
        let commission = calculate_commission(&rate, &line);
        prop_assert!(commission >= Decimal::ZERO);
        prop_assert!(commission <= Decimal::from(base));
    }

    #[test]
    fn tiered_commission_is_monotone_in_base(
        a in 0i64..1_000_000,
        b in 0i64..1_000_000,
    ) {
        let rate = tiered_rate();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c_lo = calculate_commission(
            &rate,
            &LineInput { qty: dec!(1), base_amount: Decimal::from(lo) },
        );
        let c_hi = calculate_commission(
            &rate,
            &LineInput { qty: dec!(1), base_amount: Decimal::from(hi) },
        );
        prop_assert!(c_lo <= c_hi);
    }

    #[test]
    fn tiered_commission_bounded_by_top_rate(base in 1i64..1_000_000) {
        let rate = tiered_rate();
        let line = LineInput { qty: dec!(1), base_amount: Decimal::from(base) };
        let commission = calculate_commission(&rate, &line);
        // 12% is the highest bracket, so marginal commission cannot beat it.
        prop_assert!(commission <= Decimal::from(base) * dec!(0.12));
    }

    #[test]
    fn clamped_commission_stays_within_bounds(
        base in 0i64..1_000_000,
        min in 0i64..1000,
        span in 0i64..10_000,
    ) {
        let mut rate = percentage_rate(dec!(5));
        let max = min + span;
        rate.minimum_amount = Some(Decimal::from(min));
        rate.maximum_amount = Some(Decimal::from(max));
        let line = LineInput { qty: dec!(1), base_amount: Decimal::from(base) };
        let commission = calculate_commission(&rate, &line);
        if base > 0 {
            prop_assert!(commission >= Decimal::from(min));
            prop_assert!(commission <= Decimal::from(max));
        } else {
            prop_assert_eq!(commission, Decimal::ZERO);
        }
    }
}
