//! Settlement Domain - from submitted invoice to paid commission
//!
//! This crate owns the commission entry lifecycle. Entries are created
//! when invoices are submitted, become due as invoices are paid, and are
//! settled through payment vouchers. Every mutation goes through the
//! state machine on [`entry::CommissionEntry`]; the services module wires
//! rules, assignments, and agent gating into the pipeline.

pub mod entry;
pub mod error;
pub mod events;
pub mod invoice;
pub mod reports;
pub mod services;
pub mod voucher;

pub use entry::{CommissionEntry, CommissionLineItem, InvoicePaymentStatus, PaymentStatus};
pub use error::SettlementError;
pub use events::{handle_event, Command, HookContext, HookEvent};
pub use invoice::{InvoiceLine, InvoiceSnapshot};
pub use reports::{payable_entries, summarize_by_agent, AgentSummary, PayableRow};
pub use services::{apply_voucher, build_entries_for_invoice, revert_voucher};
pub use voucher::{PaymentVoucher, VoucherLine};
