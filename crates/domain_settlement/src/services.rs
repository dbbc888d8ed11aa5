//! Settlement services
//!
//! Orchestration over the domain aggregates: building entries from a
//! submitted invoice and applying or reverting payment vouchers. The
//! services stay pure; persistence and transactions live in the
//! infrastructure layer.

use rust_decimal::Decimal;
use tracing::{debug, info};

use domain_agent::AgentDirectory;
use domain_assignment::AssignmentBook;
use domain_rules::{calculate_commission, CalculationMethod, LineInput, RuleSet};

use crate::entry::{CommissionEntry, CommissionLineItem};
use crate::error::SettlementError;
use crate::invoice::InvoiceSnapshot;
use crate::voucher::PaymentVoucher;

/// Builds commission entries for a submitted invoice.
///
/// One entry per entitled agent that is active with commission enabled.
/// Assignment overrides replace the rule percentage for Percentage-method
/// rates only. Lines with no rate in force contribute nothing; agents
/// whose lines all resolve to zero get no entry.
pub fn build_entries_for_invoice(
    invoice: &InvoiceSnapshot,
    directory: &AgentDirectory,
    assignments: &AssignmentBook,
    rules: &RuleSet,
) -> Vec<CommissionEntry> {
    let entitlements = assignments.applicable_agents(
        &invoice.customer,
        invoice.territory.as_ref(),
        &invoice.company,
        invoice.posting_date,
    );

    let mut entries = Vec::new();
    for entitlement in entitlements {
        let agent = match directory.get(&entitlement.agent) {
            Some(agent) if agent.accrues_commission() => agent,
            _ => {
                debug!(agent = %entitlement.agent, "skipping agent without commission accrual");
                continue;
            }
        };

        let mut items = Vec::new();
        for line in &invoice.lines {
            let Some(mut rate) = rules.resolve(
                &entitlement.agent,
                &invoice.company,
                &line.item_group,
                invoice.posting_date,
            ) else {
                continue;
            };

            if rate.method == CalculationMethod::Percentage {
                if let Some(override_pct) = entitlement.override_percentage {
                    rate.commission_percentage = override_pct;
                }
            }

            let amount = calculate_commission(
                &rate,
                &LineInput {
                    qty: line.qty,
                    base_amount: line.base_amount,
                },
            );
            items.push(CommissionLineItem {
                item_code: line.item_code.clone(),
                item_group: line.item_group.clone(),
                qty: line.qty,
                base_amount: line.base_amount,
                commission_percentage: (rate.method == CalculationMethod::Percentage)
                    .then_some(rate.commission_percentage),
                rule: Some(rate.rule_id),
                commission_amount: amount,
            });
        }

        let total: Decimal = items.iter().map(|i| i.commission_amount).sum();
        if items.is_empty() || total <= Decimal::ZERO {
            debug!(agent = %entitlement.agent, invoice = %invoice.id, "no commission accrued");
            continue;
        }

        let mut entry = CommissionEntry::new(
            entitlement.agent,
            invoice,
            items,
            agent.commission_on_payment,
        );
        entry.record_invoice_payment(invoice);
        info!(
            entry = %entry.id,
            agent = %entry.agent,
            invoice = %invoice.id,
            total = %entry.total_commission,
            "commission entry created"
        );
        entries.push(entry);
    }
    entries
}

fn find_entry<'a>(
    entries: &'a [CommissionEntry],
    id: &core_kernel::EntryId,
) -> Result<&'a CommissionEntry, SettlementError> {
    entries
        .iter()
        .find(|e| &e.id == id)
        .ok_or_else(|| SettlementError::EntryNotFound(id.to_string()))
}

fn find_entry_mut<'a>(
    entries: &'a mut [CommissionEntry],
    id: &core_kernel::EntryId,
) -> Result<&'a mut CommissionEntry, SettlementError> {
    entries
        .iter_mut()
        .find(|e| &e.id == id)
        .ok_or_else(|| SettlementError::EntryNotFound(id.to_string()))
}

/// Applies a submitted voucher against its entries.
///
/// Every line is validated before any entry is touched, so a failing line
/// leaves the whole batch unchanged.
pub fn apply_voucher(
    voucher: &PaymentVoucher,
    entries: &mut [CommissionEntry],
) -> Result<(), SettlementError> {
    if !voucher.doc_status.is_submitted() {
        return Err(SettlementError::VoucherNotSubmitted);
    }
    voucher.validate()?;

    for line in &voucher.lines {
        let entry = find_entry(entries, &line.entry)?;
        if !entry.payment_status.is_payable() {
            return Err(SettlementError::EntryNotPayable {
                entry: entry.id.to_string(),
                status: entry.payment_status,
            });
        }
        if line.amount.currency() != entry.currency {
            return Err(SettlementError::CurrencyMismatch {
                voucher: line.amount.currency().to_string(),
                entry: entry.currency.to_string(),
            });
        }
        if line.amount.amount() > entry.outstanding().amount() {
            return Err(SettlementError::PaymentExceedsCommission {
                entry: entry.id.to_string(),
            });
        }
    }

    for line in &voucher.lines {
        let entry = find_entry_mut(entries, &line.entry)?;
        entry.apply_payment(line.amount)?;
    }
    info!(voucher = %voucher.id, agent = %voucher.agent, "voucher applied");
    Ok(())
}

/// Reverses a cancelled voucher's payments.
///
/// Mirrors [`apply_voucher`]: all lines are validated first, then every
/// entry moves back by its line amount.
pub fn revert_voucher(
    voucher: &PaymentVoucher,
    entries: &mut [CommissionEntry],
) -> Result<(), SettlementError> {
    voucher.validate()?;

    for line in &voucher.lines {
        let entry = find_entry(entries, &line.entry)?;
        if line.amount.amount() > entry.paid_amount.amount() {
            return Err(SettlementError::RevertExceedsPaid {
                entry: entry.id.to_string(),
            });
        }
    }

    for line in &voucher.lines {
        let entry = find_entry_mut(entries, &line.entry)?;
        entry.revert_payment(line.amount)?;
    }
    info!(voucher = %voucher.id, agent = %voucher.agent, "voucher reverted");
    Ok(())
}
