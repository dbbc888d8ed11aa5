//! Payment voucher DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_settlement::PaymentVoucher;

#[derive(Debug, Serialize, Deserialize)]
pub struct VoucherLineDto {
    pub entry_id: Uuid,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVoucherRequest {
    pub agent_id: Uuid,
    #[validate(length(min = 1))]
    pub company: String,
    pub posting_date: NaiveDate,
    pub currency: String,
    #[validate(length(min = 1))]
    pub lines: Vec<VoucherLineDto>,
}

#[derive(Debug, Serialize)]
pub struct VoucherResponse {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub company: String,
    pub posting_date: NaiveDate,
    pub currency: String,
    pub total_amount: Decimal,
    pub line_count: usize,
    pub doc_status: i16,
}

impl VoucherResponse {
    pub fn from_voucher(voucher: &PaymentVoucher, total: Decimal) -> Self {
        Self {
            id: voucher.id.into(),
            agent_id: voucher.agent.into(),
            company: voucher.company.to_string(),
            posting_date: voucher.posting_date,
            currency: voucher.currency.to_string(),
            total_amount: total,
            line_count: voucher.lines.len(),
            doc_status: voucher.doc_status.code(),
        }
    }
}
