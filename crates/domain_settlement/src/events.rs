//! Document event handling
//!
//! The host ERP raises document events (invoice submitted, payment
//! updated, voucher cancelled). This module turns each event into a list
//! of commands over pure in-memory state; the caller persists the
//! commands and dispatches notifications. Handlers never mutate the
//! context, which keeps every event replayable.

use serde::{Deserialize, Serialize};

use core_kernel::InvoiceId;
use domain_agent::AgentDirectory;
use domain_assignment::AssignmentBook;
use domain_rules::RuleSet;

use crate::entry::{CommissionEntry, PaymentStatus};
use crate::error::SettlementError;
use crate::invoice::InvoiceSnapshot;
use crate::services::{apply_voucher, build_entries_for_invoice, revert_voucher};
use crate::voucher::PaymentVoucher;

/// A document event from the host ERP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HookEvent {
    InvoiceSubmitted(InvoiceSnapshot),
    InvoicePaymentUpdated(InvoiceSnapshot),
    InvoiceCancelled(InvoiceId),
    VoucherSubmitted(PaymentVoucher),
    VoucherCancelled(PaymentVoucher),
}

/// A state change or side effect the caller must carry out
#[derive(Debug, Clone)]
pub enum Command {
    CreateEntry(CommissionEntry),
    UpdateEntry(CommissionEntry),
    Notify {
        recipients: Vec<String>,
        subject: String,
        body: String,
    },
}

/// Read-only state the handlers consult
pub struct HookContext<'a> {
    pub directory: &'a AgentDirectory,
    pub assignments: &'a AssignmentBook,
    pub rules: &'a RuleSet,
    pub entries: &'a [CommissionEntry],
}

/// Handles one event, returning the commands to apply.
///
/// Handlers are all-or-nothing: an error means no command should be
/// applied, matching the surrounding database transaction.
pub fn handle_event(
    event: &HookEvent,
    ctx: &HookContext<'_>,
) -> Result<Vec<Command>, SettlementError> {
    match event {
        HookEvent::InvoiceSubmitted(invoice) => Ok(on_invoice_submitted(invoice, ctx)),
        HookEvent::InvoicePaymentUpdated(invoice) => Ok(on_invoice_payment_updated(invoice, ctx)),
        HookEvent::InvoiceCancelled(invoice_id) => on_invoice_cancelled(invoice_id, ctx),
        HookEvent::VoucherSubmitted(voucher) => on_voucher_submitted(voucher, ctx),
        HookEvent::VoucherCancelled(voucher) => on_voucher_cancelled(voucher, ctx),
    }
}

fn on_invoice_submitted(invoice: &InvoiceSnapshot, ctx: &HookContext<'_>) -> Vec<Command> {
    build_entries_for_invoice(invoice, ctx.directory, ctx.assignments, ctx.rules)
        .into_iter()
        .filter(|entry| {
            // Agents who opted out of automatic creation get their
            // entries through the manual endpoint instead.
            ctx.directory
                .get(&entry.agent)
                .map_or(false, |agent| agent.auto_create_entries)
        })
        .map(Command::CreateEntry)
        .collect()
}

fn on_invoice_payment_updated(invoice: &InvoiceSnapshot, ctx: &HookContext<'_>) -> Vec<Command> {
    ctx.entries
        .iter()
        .filter(|e| e.invoice == invoice.id && e.payment_status != PaymentStatus::Cancelled)
        .map(|e| {
            let mut updated = e.clone();
            updated.record_invoice_payment(invoice);
            Command::UpdateEntry(updated)
        })
        .collect()
}

fn on_invoice_cancelled(
    invoice_id: &InvoiceId,
    ctx: &HookContext<'_>,
) -> Result<Vec<Command>, SettlementError> {
    let mut commands = Vec::new();
    for entry in ctx.entries.iter().filter(|e| &e.invoice == invoice_id) {
        let mut updated = entry.clone();
        updated.cancel()?;
        commands.push(Command::UpdateEntry(updated));
    }
    Ok(commands)
}

fn affected_entries(
    voucher: &PaymentVoucher,
    ctx: &HookContext<'_>,
) -> Vec<CommissionEntry> {
    ctx.entries
        .iter()
        .filter(|e| voucher.lines.iter().any(|l| l.entry == e.id))
        .cloned()
        .collect()
}

fn on_voucher_submitted(
    voucher: &PaymentVoucher,
    ctx: &HookContext<'_>,
) -> Result<Vec<Command>, SettlementError> {
    let mut affected = affected_entries(voucher, ctx);
    apply_voucher(voucher, &mut affected)?;

    let mut commands: Vec<Command> = affected.into_iter().map(Command::UpdateEntry).collect();
    if let Some(email) = ctx.directory.get(&voucher.agent).and_then(|a| a.email.clone()) {
        let total = voucher.total_amount()?;
        commands.push(Command::Notify {
            recipients: vec![email],
            subject: format!("Commission payment {}", voucher.id),
            body: format!(
                "A commission payment of {} was processed on {}.",
                total, voucher.posting_date
            ),
        });
    }
    Ok(commands)
}

fn on_voucher_cancelled(
    voucher: &PaymentVoucher,
    ctx: &HookContext<'_>,
) -> Result<Vec<Command>, SettlementError> {
    let mut affected = affected_entries(voucher, ctx);
    revert_voucher(voucher, &mut affected)?;
    Ok(affected.into_iter().map(Command::UpdateEntry).collect())
}
