//! Settlement domain errors

use thiserror::Error;

use crate::entry::PaymentStatus;

/// Errors that can occur in the settlement domain
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("Payment would exceed the commission amount on entry {entry}")]
    PaymentExceedsCommission { entry: String },

    #[error("Commission entry not found: {0}")]
    EntryNotFound(String),

    #[error("Entry {entry} is not payable in status {status:?}")]
    EntryNotPayable {
        entry: String,
        status: PaymentStatus,
    },

    #[error("Revert would exceed the amount paid against entry {entry}")]
    RevertExceedsPaid { entry: String },

    #[error("Cannot cancel entry {entry}: {paid} already paid against it")]
    CancelWithPayments {
        entry: String,
        paid: rust_decimal::Decimal,
    },

    #[error("Entry {entry} is inconsistent: status {status:?} with {paid} paid of {total}")]
    InconsistentEntry {
        entry: String,
        status: PaymentStatus,
        paid: rust_decimal::Decimal,
        total: rust_decimal::Decimal,
    },

    #[error("Voucher must carry at least one line")]
    EmptyVoucher,

    #[error("Voucher line amount must be positive, got {0}")]
    NonPositiveVoucherLine(rust_decimal::Decimal),

    #[error("Voucher references entry {0} more than once")]
    DuplicateVoucherLine(String),

    #[error("Voucher currency {voucher} does not match entry currency {entry}")]
    CurrencyMismatch { voucher: String, entry: String },

    #[error("Voucher is not submitted")]
    VoucherNotSubmitted,

    #[error(transparent)]
    Money(#[from] core_kernel::MoneyError),
}
