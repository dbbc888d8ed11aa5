//! Commission entry DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_settlement::{AgentSummary, CommissionEntry, PayableRow};

#[derive(Debug, Deserialize)]
pub struct EntryListQuery {
    pub agent_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub invoice_id: Uuid,
    pub posting_date: NaiveDate,
    pub currency: String,
    pub total_commission: Decimal,
    pub paid_amount: Decimal,
    pub outstanding: Decimal,
    pub payment_status: String,
    pub invoice_payment_status: String,
    pub item_count: usize,
}

impl From<&CommissionEntry> for EntryResponse {
    fn from(entry: &CommissionEntry) -> Self {
        Self {
            id: entry.id.into(),
            agent_id: entry.agent.into(),
            invoice_id: entry.invoice.into(),
            posting_date: entry.posting_date,
            currency: entry.currency.to_string(),
            total_commission: entry.total_commission.amount(),
            paid_amount: entry.paid_amount.amount(),
            outstanding: entry.outstanding().amount(),
            payment_status: format!("{:?}", entry.payment_status),
            invoice_payment_status: format!("{:?}", entry.invoice_payment_status),
            item_count: entry.items.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PayableResponse {
    pub entry_id: Uuid,
    pub agent_id: Uuid,
    pub invoice_id: Uuid,
    pub posting_date: NaiveDate,
    pub currency: String,
    pub outstanding: Decimal,
    pub payment_status: String,
}

impl From<&PayableRow> for PayableResponse {
    fn from(row: &PayableRow) -> Self {
        Self {
            entry_id: row.entry.into(),
            agent_id: row.agent.into(),
            invoice_id: row.invoice.into(),
            posting_date: row.posting_date,
            currency: row.currency.to_string(),
            outstanding: row.outstanding,
            payment_status: format!("{:?}", row.payment_status),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub agent_id: Uuid,
    pub currency: String,
    pub entry_count: usize,
    pub total_commission: Decimal,
    pub pending_amount: Decimal,
    pub due_amount: Decimal,
    pub paid_amount: Decimal,
}

impl From<&AgentSummary> for SummaryResponse {
    fn from(s: &AgentSummary) -> Self {
        Self {
            agent_id: s.agent.into(),
            currency: s.currency.to_string(),
            entry_count: s.entry_count,
            total_commission: s.total_commission,
            pending_amount: s.pending_amount,
            due_amount: s.due_amount,
            paid_amount: s.paid_amount,
        }
    }
}
