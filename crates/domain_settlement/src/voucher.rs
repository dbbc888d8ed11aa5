//! Commission payment voucher
//!
//! A voucher disburses commission against one or more entries for a
//! single agent. The voucher itself is a dumb document; all bookkeeping
//! happens in [`crate::services::apply_voucher`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, CompanyCode, Currency, DocStatus, EntryId, Money, VoucherId};

use crate::error::SettlementError;

/// One voucher line paying down one entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherLine {
    pub entry: EntryId,
    pub amount: Money,
}

/// A commission disbursement document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVoucher {
    pub id: VoucherId,
    pub agent: AgentId,
    pub company: CompanyCode,
    pub posting_date: NaiveDate,
    pub currency: Currency,
    pub lines: Vec<VoucherLine>,
    pub doc_status: DocStatus,
    pub created_at: DateTime<Utc>,
}

impl PaymentVoucher {
    pub fn new(
        agent: AgentId,
        company: CompanyCode,
        posting_date: NaiveDate,
        currency: Currency,
        lines: Vec<VoucherLine>,
    ) -> Self {
        Self {
            id: VoucherId::new_v7(),
            agent,
            company,
            posting_date,
            currency,
            lines,
            doc_status: DocStatus::Draft,
            created_at: Utc::now(),
        }
    }

    /// Sum of all line amounts
    pub fn total_amount(&self) -> Result<Money, SettlementError> {
        let mut total = Money::zero(self.currency);
        for line in &self.lines {
            total = total.checked_add(&line.amount)?;
        }
        Ok(total)
    }

    /// Validates the document shape before submission
    pub fn validate(&self) -> Result<(), SettlementError> {
        if self.lines.is_empty() {
            return Err(SettlementError::EmptyVoucher);
        }
        for (idx, line) in self.lines.iter().enumerate() {
            if !line.amount.is_positive() {
                return Err(SettlementError::NonPositiveVoucherLine(line.amount.amount()));
            }
            if line.amount.currency() != self.currency {
                return Err(SettlementError::CurrencyMismatch {
                    voucher: self.currency.to_string(),
                    entry: line.amount.currency().to_string(),
                });
            }
            if self.lines.iter().take(idx).any(|l| l.entry == line.entry) {
                return Err(SettlementError::DuplicateVoucherLine(line.entry.to_string()));
            }
        }
        Ok(())
    }

    /// Marks the voucher submitted after validation
    pub fn submit(&mut self) -> Result<(), SettlementError> {
        self.validate()?;
        self.doc_status = DocStatus::Submitted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn voucher(lines: Vec<VoucherLine>) -> PaymentVoucher {
        PaymentVoucher::new(
            AgentId::new(),
            CompanyCode::from("ACME"),
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            Currency::USD,
            lines,
        )
    }

    fn line(entry: EntryId, amount: rust_decimal::Decimal) -> VoucherLine {
        VoucherLine {
            entry,
            amount: Money::new(amount, Currency::USD),
        }
    }

    #[test]
    fn test_empty_voucher_rejected() {
        let mut v = voucher(Vec::new());
        assert!(matches!(v.submit(), Err(SettlementError::EmptyVoucher)));
        assert!(!v.doc_status.is_submitted());
    }

    #[test]
    fn test_non_positive_line_rejected() {
        let mut v = voucher(vec![line(EntryId::new(), dec!(0))]);
        assert!(matches!(
            v.submit(),
            Err(SettlementError::NonPositiveVoucherLine(_))
        ));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let entry = EntryId::new();
        let mut v = voucher(vec![line(entry, dec!(10)), line(entry, dec!(20))]);
        assert!(matches!(
            v.submit(),
            Err(SettlementError::DuplicateVoucherLine(_))
        ));
    }

    #[test]
    fn test_submit_and_total() {
        let mut v = voucher(vec![
            line(EntryId::new(), dec!(40)),
            line(EntryId::new(), dec!(60)),
        ]);
        v.submit().unwrap();
        assert!(v.doc_status.is_submitted());
        assert_eq!(v.total_amount().unwrap().amount(), dec!(100));
    }
}
