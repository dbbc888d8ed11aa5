//! Assignment domain errors

use thiserror::Error;

/// Errors that can occur in the assignment domain
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Customer already has an overlapping exclusive assignment {existing}")]
    ExclusiveConflict { existing: String },

    #[error("Override percentage must be between 0 and 100, got {0}")]
    OverrideOutOfRange(rust_decimal::Decimal),

    #[error("Priority must not be negative, got {0}")]
    NegativePriority(i32),

    #[error("Effective window is invalid: {0}")]
    Temporal(#[from] core_kernel::TemporalError),
}
