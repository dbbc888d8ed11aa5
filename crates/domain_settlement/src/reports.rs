//! Reporting over commission entries
//!
//! Flat read models for the payables view and the per-agent summary that
//! feeds statements and the monthly report. Entries in different
//! currencies never sum together; summaries group by agent and currency.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{AgentId, Currency, EntryId, InvoiceId};

use crate::entry::{CommissionEntry, PaymentStatus};

/// One row of the commission payables report
#[derive(Debug, Clone, Serialize)]
pub struct PayableRow {
    pub entry: EntryId,
    pub agent: AgentId,
    pub invoice: InvoiceId,
    pub posting_date: NaiveDate,
    pub currency: Currency,
    pub total_commission: Decimal,
    pub paid_amount: Decimal,
    pub outstanding: Decimal,
    pub payment_status: PaymentStatus,
}

/// Per-agent aggregate over a set of entries
#[derive(Debug, Clone, Serialize)]
pub struct AgentSummary {
    pub agent: AgentId,
    pub currency: Currency,
    pub entry_count: usize,
    pub total_commission: Decimal,
    pub pending_amount: Decimal,
    pub due_amount: Decimal,
    pub paid_amount: Decimal,
}

/// Entries with commission still owed, ordered by posting date
pub fn payable_entries(entries: &[CommissionEntry]) -> Vec<PayableRow> {
    let mut rows: Vec<PayableRow> = entries
        .iter()
        .filter(|e| e.payment_status.is_payable())
        .map(|e| PayableRow {
            entry: e.id,
            agent: e.agent,
            invoice: e.invoice,
            posting_date: e.posting_date,
            currency: e.currency,
            total_commission: e.total_commission.amount(),
            paid_amount: e.paid_amount.amount(),
            outstanding: e.outstanding().amount(),
            payment_status: e.payment_status,
        })
        .collect();
    rows.sort_by_key(|r| (r.posting_date, r.agent.to_string()));
    rows
}

/// Aggregates entries by agent and currency. Cancelled entries are
/// excluded.
pub fn summarize_by_agent(entries: &[CommissionEntry]) -> Vec<AgentSummary> {
    let mut summaries: Vec<AgentSummary> = Vec::new();
    for entry in entries {
        if entry.payment_status == PaymentStatus::Cancelled {
            continue;
        }
        let summary = match summaries
            .iter_mut()
            .find(|s| s.agent == entry.agent && s.currency == entry.currency)
        {
            Some(summary) => summary,
            None => {
                summaries.push(AgentSummary {
                    agent: entry.agent,
                    currency: entry.currency,
                    entry_count: 0,
                    total_commission: Decimal::ZERO,
                    pending_amount: Decimal::ZERO,
                    due_amount: Decimal::ZERO,
                    paid_amount: Decimal::ZERO,
                });
                summaries.last_mut().unwrap()
            }
        };

        summary.entry_count += 1;
        summary.total_commission += entry.total_commission.amount();
        summary.paid_amount += entry.paid_amount.amount();
        match entry.payment_status {
            PaymentStatus::Pending => {
                summary.pending_amount += entry.total_commission.amount();
            }
            PaymentStatus::Due | PaymentStatus::PartiallyPaid => {
                summary.due_amount += entry.outstanding().amount();
            }
            _ => {}
        }
    }
    summaries.sort_by_key(|s| s.agent.to_string());
    summaries
}
