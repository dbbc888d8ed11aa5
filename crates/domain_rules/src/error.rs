//! Rule domain errors

use thiserror::Error;

/// Errors that can occur in the rules domain
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Effective window overlaps existing rule {existing} for the same agent and company")]
    OverlappingRule { existing: String },

    #[error("Commission percentage must be between 0 and 100, got {0}")]
    PercentageOutOfRange(rust_decimal::Decimal),

    #[error("Fixed amount must not be negative, got {0}")]
    NegativeFixedAmount(rust_decimal::Decimal),

    #[error("Rule must define at least one item group rate")]
    NoRates,

    #[error("Duplicate rate for item group {0}")]
    DuplicateItemGroup(String),

    #[error("Effective window is invalid: {0}")]
    Temporal(#[from] core_kernel::TemporalError),

    #[error("Minimum commission amount exceeds maximum")]
    MinAboveMax,

    #[error("Tier schedule is empty")]
    EmptyTiers,

    #[error("Tier from-amount must not be negative, got {0}")]
    NegativeTierBound(rust_decimal::Decimal),

    #[error("Tier from-amount {from} must be below its to-amount {to}")]
    InvertedTier {
        from: rust_decimal::Decimal,
        to: rust_decimal::Decimal,
    },

    #[error("Tiers overlap at amount {0}")]
    OverlappingTiers(rust_decimal::Decimal),

    #[error("Only the last tier may be open-ended")]
    OpenTierNotLast,
}
