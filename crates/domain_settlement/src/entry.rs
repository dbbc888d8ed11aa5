//! Commission entry state machine
//!
//! An entry records the commission one agent earned on one invoice. Its
//! payment status is the heart of reconciliation:
//!
//! ```text
//! Pending -> Due -> PartiallyPaid -> Paid
//!    \________\_________\
//!                         Cancelled
//! ```
//!
//! Pending means the invoice is not yet paid (for agents who earn on
//! payment). Due means the commission is payable. Payments move the entry
//! forward, reverts move it back, and cancellation is terminal and only
//! allowed while nothing has been paid out.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{
    AgentId, CompanyCode, Currency, CustomerId, DocStatus, EntryId, InvoiceId, ItemGroup, Money,
    RuleId,
};

use crate::error::SettlementError;
use crate::invoice::InvoiceSnapshot;

/// Payment status of a commission entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Commission accrued but not yet payable
    Pending,
    /// Payable, nothing disbursed yet
    Due,
    /// Partly disbursed
    PartiallyPaid,
    /// Fully disbursed
    Paid,
    /// Terminal, no further transitions
    Cancelled,
}

impl PaymentStatus {
    /// Returns true if payments may be applied in this status
    pub fn is_payable(&self) -> bool {
        matches!(self, PaymentStatus::Due | PaymentStatus::PartiallyPaid)
    }
}

/// Payment status of the underlying invoice, tracked for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoicePaymentStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// One invoice line's contribution to an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionLineItem {
    pub item_code: String,
    pub item_group: ItemGroup,
    pub qty: Decimal,
    pub base_amount: Decimal,
    /// Effective percentage after any assignment override, when applicable
    pub commission_percentage: Option<Decimal>,
    /// Rule that produced this line, None when no rate was in force
    pub rule: Option<RuleId>,
    pub commission_amount: Decimal,
}

/// The commission one agent earned on one invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionEntry {
    pub id: EntryId,
    pub agent: AgentId,
    pub invoice: InvoiceId,
    pub customer: CustomerId,
    pub company: CompanyCode,
    pub posting_date: NaiveDate,
    pub currency: Currency,
    pub items: Vec<CommissionLineItem>,
    pub total_commission: Money,
    pub paid_amount: Money,
    pub payment_status: PaymentStatus,
    pub invoice_payment_status: InvoicePaymentStatus,
    /// Commission becomes due only once invoice payment begins
    pub commission_on_payment: bool,
    pub doc_status: DocStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommissionEntry {
    /// Creates a submitted entry from calculated line items.
    ///
    /// Agents who earn regardless of invoice payment start at Due;
    /// everyone else starts at Pending until invoice payment begins.
    pub fn new(
        agent: AgentId,
        invoice: &InvoiceSnapshot,
        items: Vec<CommissionLineItem>,
        commission_on_payment: bool,
    ) -> Self {
        let total: Decimal = items.iter().map(|i| i.commission_amount).sum();
        let now = Utc::now();
        Self {
            id: EntryId::new_v7(),
            agent,
            invoice: invoice.id,
            customer: invoice.customer,
            company: invoice.company.clone(),
            posting_date: invoice.posting_date,
            currency: invoice.currency,
            items,
            total_commission: Money::new(total, invoice.currency),
            paid_amount: Money::zero(invoice.currency),
            payment_status: if commission_on_payment {
                PaymentStatus::Pending
            } else {
                PaymentStatus::Due
            },
            invoice_payment_status: InvoicePaymentStatus::Unpaid,
            commission_on_payment,
            doc_status: DocStatus::Submitted,
            created_at: now,
            updated_at: now,
        }
    }

    /// Commission still owed to the agent
    pub fn outstanding(&self) -> Money {
        Money::new(
            self.total_commission.amount() - self.paid_amount.amount(),
            self.currency,
        )
    }

    /// Commission currently due, proportional to the invoice paid fraction.
    ///
    /// Agents not gated on invoice payment are owed the full amount from
    /// the start.
    pub fn commission_due_amount(&self, invoice: &InvoiceSnapshot) -> Money {
        if !self.commission_on_payment {
            return self.total_commission;
        }
        let fraction = invoice.paid_fraction().unwrap_or(Decimal::ZERO);
        self.total_commission
            .multiply(fraction.min(Decimal::ONE))
            .round_to_currency()
    }

    /// Reacts to an invoice payment update.
    ///
    /// Tracks the invoice payment status and, for payment-gated agents,
    /// moves Pending to Due as soon as any commission becomes due (the
    /// invoice paid fraction turns positive). A full payment reversal on
    /// the invoice moves an untouched Due entry back to Pending. Entries
    /// with disbursed commission are left alone.
    pub fn record_invoice_payment(&mut self, invoice: &InvoiceSnapshot) {
        let paid_something = invoice.paid_amount().is_positive();
        self.invoice_payment_status = if invoice.is_fully_paid() {
            InvoicePaymentStatus::Paid
        } else if paid_something {
            InvoicePaymentStatus::PartiallyPaid
        } else {
            InvoicePaymentStatus::Unpaid
        };

        if self.commission_on_payment {
            match (self.payment_status, paid_something) {
                (PaymentStatus::Pending, true) => self.payment_status = PaymentStatus::Due,
                (PaymentStatus::Due, false) => self.payment_status = PaymentStatus::Pending,
                _ => {}
            }
        }
        self.updated_at = Utc::now();
    }

    /// Applies a voucher payment against this entry
    pub fn apply_payment(&mut self, amount: Money) -> Result<(), SettlementError> {
        if !self.payment_status.is_payable() {
            return Err(SettlementError::EntryNotPayable {
                entry: self.id.to_string(),
                status: self.payment_status,
            });
        }
        if !amount.is_positive() {
            return Err(SettlementError::NonPositiveVoucherLine(amount.amount()));
        }
        let new_paid = self.paid_amount.checked_add(&amount)?;
        if new_paid.amount() > self.total_commission.amount() {
            return Err(SettlementError::PaymentExceedsCommission {
                entry: self.id.to_string(),
            });
        }
        self.paid_amount = new_paid;
        self.payment_status = if self.paid_amount.amount() >= self.total_commission.amount() {
            PaymentStatus::Paid
        } else {
            PaymentStatus::PartiallyPaid
        };
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reverses a voucher payment, e.g. on voucher cancellation
    pub fn revert_payment(&mut self, amount: Money) -> Result<(), SettlementError> {
        if !matches!(
            self.payment_status,
            PaymentStatus::PartiallyPaid | PaymentStatus::Paid
        ) {
            return Err(SettlementError::EntryNotPayable {
                entry: self.id.to_string(),
                status: self.payment_status,
            });
        }
        if amount.amount() > self.paid_amount.amount() {
            return Err(SettlementError::RevertExceedsPaid {
                entry: self.id.to_string(),
            });
        }
        self.paid_amount = self.paid_amount.checked_sub(&amount)?;
        self.payment_status = if self.paid_amount.is_zero() {
            PaymentStatus::Due
        } else {
            PaymentStatus::PartiallyPaid
        };
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancels the entry. Refused once any commission has been paid out.
    pub fn cancel(&mut self) -> Result<(), SettlementError> {
        if self.payment_status == PaymentStatus::Cancelled {
            return Ok(());
        }
        if self.paid_amount.is_positive() {
            return Err(SettlementError::CancelWithPayments {
                entry: self.id.to_string(),
                paid: self.paid_amount.amount(),
            });
        }
        self.payment_status = PaymentStatus::Cancelled;
        self.doc_status = DocStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Verifies the bookkeeping invariants hold
    pub fn check_invariants(&self) -> Result<(), SettlementError> {
        let paid = self.paid_amount.amount();
        let total = self.total_commission.amount();
        let consistent = match self.payment_status {
            PaymentStatus::Pending | PaymentStatus::Due | PaymentStatus::Cancelled => {
                paid.is_zero()
            }
            PaymentStatus::PartiallyPaid => paid > Decimal::ZERO && paid < total,
            PaymentStatus::Paid => paid == total,
        };
        if paid < Decimal::ZERO || paid > total || !consistent {
            return Err(SettlementError::InconsistentEntry {
                entry: self.id.to_string(),
                status: self.payment_status,
                paid,
                total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::invoice::InvoiceSnapshot;

    fn invoice(outstanding: Decimal) -> InvoiceSnapshot {
        InvoiceSnapshot {
            id: InvoiceId::new(),
            customer: CustomerId::new(),
            territory: None,
            company: CompanyCode::from("ACME"),
            posting_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            currency: Currency::USD,
            grand_total: dec!(1000),
            outstanding_amount: outstanding,
            lines: Vec::new(),
        }
    }

    fn item(amount: Decimal) -> CommissionLineItem {
        CommissionLineItem {
            item_code: "WIDGET".to_string(),
            item_group: ItemGroup::from("Electronics"),
            qty: dec!(1),
            base_amount: dec!(1000),
            commission_percentage: Some(dec!(10)),
            rule: Some(RuleId::new()),
            commission_amount: amount,
        }
    }

    fn entry(on_payment: bool) -> CommissionEntry {
        CommissionEntry::new(AgentId::new(), &invoice(dec!(1000)), vec![item(dec!(100))], on_payment)
    }

    #[test]
    fn test_initial_status_depends_on_payment_gating() {
        assert_eq!(entry(true).payment_status, PaymentStatus::Pending);
        assert_eq!(entry(false).payment_status, PaymentStatus::Due);
    }

    #[test]
    fn test_pending_becomes_due_when_invoice_payment_starts() {
        let mut e = entry(true);
        e.record_invoice_payment(&invoice(dec!(500)));
        assert_eq!(e.payment_status, PaymentStatus::Due);
        assert_eq!(e.invoice_payment_status, InvoicePaymentStatus::PartiallyPaid);
        assert_eq!(e.commission_due_amount(&invoice(dec!(500))).amount(), dec!(50));

        e.record_invoice_payment(&invoice(dec!(0)));
        assert_eq!(e.payment_status, PaymentStatus::Due);
        assert_eq!(e.invoice_payment_status, InvoicePaymentStatus::Paid);
        assert_eq!(e.commission_due_amount(&invoice(dec!(0))).amount(), dec!(100));
    }

    #[test]
    fn test_invoice_payment_reversal_returns_to_pending() {
        let mut e = entry(true);
        e.record_invoice_payment(&invoice(dec!(0)));
        assert_eq!(e.payment_status, PaymentStatus::Due);

        e.record_invoice_payment(&invoice(dec!(1000)));
        assert_eq!(e.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_refresh_of_partially_disbursed_entry_tracks_invoice_only() {
        let mut e = entry(true);
        e.record_invoice_payment(&invoice(dec!(500)));
        e.apply_payment(Money::new(dec!(40), Currency::USD)).unwrap();
        assert_eq!(e.payment_status, PaymentStatus::PartiallyPaid);

        // Invoice settles in full; disbursed status stays put but the
        // invoice side refreshes
        e.record_invoice_payment(&invoice(dec!(0)));
        assert_eq!(e.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(e.invoice_payment_status, InvoicePaymentStatus::Paid);

        // A reversal on the invoice never walks back disbursed commission
        e.record_invoice_payment(&invoice(dec!(1000)));
        assert_eq!(e.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(e.invoice_payment_status, InvoicePaymentStatus::Unpaid);
    }

    #[test]
    fn test_ungated_entry_is_due_in_full() {
        let e = entry(false);
        assert_eq!(
            e.commission_due_amount(&invoice(dec!(1000))).amount(),
            dec!(100)
        );
    }

    #[test]
    fn test_payment_lifecycle() {
        let mut e = entry(false);
        e.apply_payment(Money::new(dec!(40), Currency::USD)).unwrap();
        assert_eq!(e.payment_status, PaymentStatus::PartiallyPaid);
        assert_eq!(e.outstanding().amount(), dec!(60));

        e.apply_payment(Money::new(dec!(60), Currency::USD)).unwrap();
        assert_eq!(e.payment_status, PaymentStatus::Paid);
        e.check_invariants().unwrap();
    }

    #[test]
    fn test_overpayment_rejected() {
        let mut e = entry(false);
        let result = e.apply_payment(Money::new(dec!(150), Currency::USD));
        assert!(matches!(
            result,
            Err(SettlementError::PaymentExceedsCommission { .. })
        ));
        assert_eq!(e.payment_status, PaymentStatus::Due);
    }

    #[test]
    fn test_payment_on_pending_entry_rejected() {
        let mut e = entry(true);
        let result = e.apply_payment(Money::new(dec!(50), Currency::USD));
        assert!(matches!(result, Err(SettlementError::EntryNotPayable { .. })));
    }

    #[test]
    fn test_revert_returns_to_due() {
        let mut e = entry(false);
        e.apply_payment(Money::new(dec!(100), Currency::USD)).unwrap();
        assert_eq!(e.payment_status, PaymentStatus::Paid);

        e.revert_payment(Money::new(dec!(100), Currency::USD)).unwrap();
        assert_eq!(e.payment_status, PaymentStatus::Due);
        assert!(e.paid_amount.is_zero());
        e.check_invariants().unwrap();
    }

    #[test]
    fn test_revert_more_than_paid_rejected() {
        let mut e = entry(false);
        e.apply_payment(Money::new(dec!(40), Currency::USD)).unwrap();
        let result = e.revert_payment(Money::new(dec!(50), Currency::USD));
        assert!(matches!(result, Err(SettlementError::RevertExceedsPaid { .. })));
    }

    #[test]
    fn test_cancel_refused_after_payment() {
        let mut e = entry(false);
        e.apply_payment(Money::new(dec!(10), Currency::USD)).unwrap();
        assert!(matches!(
            e.cancel(),
            Err(SettlementError::CancelWithPayments { .. })
        ));
    }

    #[test]
    fn test_cancel_is_terminal_and_idempotent() {
        let mut e = entry(false);
        e.cancel().unwrap();
        assert_eq!(e.payment_status, PaymentStatus::Cancelled);
        assert!(e.doc_status.is_cancelled());
        e.cancel().unwrap();

        let result = e.apply_payment(Money::new(dec!(10), Currency::USD));
        assert!(matches!(result, Err(SettlementError::EntryNotPayable { .. })));
    }
}
