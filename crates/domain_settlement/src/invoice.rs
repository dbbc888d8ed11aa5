//! Invoice snapshot
//!
//! The host ERP owns the sales invoice; settlement only needs a read-only
//! snapshot of the fields that drive commission. Snapshots arrive through
//! the submission and payment hooks.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{
    CompanyCode, Currency, CustomerId, InvoiceId, ItemGroup, Money, MoneyError, Territory,
};

/// One invoice line as seen by the commission pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub item_code: String,
    pub item_group: ItemGroup,
    pub qty: Decimal,
    /// Net amount of the line, the commission base
    pub base_amount: Decimal,
}

/// Read-only view of a sales invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSnapshot {
    pub id: InvoiceId,
    pub customer: CustomerId,
    pub territory: Option<Territory>,
    pub company: CompanyCode,
    pub posting_date: NaiveDate,
    pub currency: Currency,
    pub grand_total: Decimal,
    pub outstanding_amount: Decimal,
    pub lines: Vec<InvoiceLine>,
}

impl InvoiceSnapshot {
    /// Amount the customer has paid so far
    pub fn paid_amount(&self) -> Money {
        Money::new(self.grand_total - self.outstanding_amount, self.currency)
    }

    /// Grand total as money
    pub fn total(&self) -> Money {
        Money::new(self.grand_total, self.currency)
    }

    /// Fraction of the invoice that has been paid, in `[0, 1]`
    pub fn paid_fraction(&self) -> Result<Decimal, MoneyError> {
        self.paid_amount().fraction_of(&self.total())
    }

    /// Returns true once the customer owes nothing
    pub fn is_fully_paid(&self) -> bool {
        self.outstanding_amount <= Decimal::ZERO
    }
}
