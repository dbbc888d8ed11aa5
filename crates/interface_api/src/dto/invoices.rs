//! Invoice hook DTOs
//!
//! The host ERP posts invoice snapshots into the hook endpoints; these
//! bodies mirror [`domain_settlement::InvoiceSnapshot`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use core_kernel::{CompanyCode, CustomerId, InvoiceId, ItemGroup, Territory};
use domain_settlement::{InvoiceLine, InvoiceSnapshot};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct InvoiceLineDto {
    pub item_code: String,
    pub item_group: String,
    pub qty: Decimal,
    pub base_amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceSnapshotDto {
    pub invoice_id: Uuid,
    pub customer_id: Uuid,
    pub territory: Option<String>,
    pub company: String,
    pub posting_date: NaiveDate,
    pub currency: String,
    pub grand_total: Decimal,
    pub outstanding_amount: Decimal,
    pub lines: Vec<InvoiceLineDto>,
}

impl InvoiceSnapshotDto {
    pub fn into_domain(self) -> Result<InvoiceSnapshot, ApiError> {
        let currency = self
            .currency
            .parse()
            .map_err(|_| ApiError::Validation(format!("unknown currency {}", self.currency)))?;
        Ok(InvoiceSnapshot {
            id: InvoiceId::from(self.invoice_id),
            customer: CustomerId::from(self.customer_id),
            territory: self.territory.map(Territory::from),
            company: CompanyCode::from(self.company),
            posting_date: self.posting_date,
            currency,
            grand_total: self.grand_total,
            outstanding_amount: self.outstanding_amount,
            lines: self
                .lines
                .into_iter()
                .map(|l| InvoiceLine {
                    item_code: l.item_code,
                    item_group: ItemGroup::from(l.item_group),
                    qty: l.qty,
                    base_amount: l.base_amount,
                })
                .collect(),
        })
    }
}
