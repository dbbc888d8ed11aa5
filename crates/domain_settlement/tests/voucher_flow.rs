//! Voucher application and reversal tests

use rust_decimal_macros::dec;

use core_kernel::{CompanyCode, Currency, CustomerId, Money};
use domain_settlement::{
    apply_voucher, build_entries_for_invoice, revert_voucher, PaymentStatus, PaymentVoucher,
    SettlementError, VoucherLine,
};
use test_utils::{date, percentage_scenario, InvoiceBuilder};

/// Builds one Due entry worth 100 commission
fn due_entry() -> Vec<domain_settlement::CommissionEntry> {
    let customer = CustomerId::new();
    let (_, directory, book, rules) = percentage_scenario(customer);
    let invoice = InvoiceBuilder::new(customer)
        .line("TV-55", "Electronics", dec!(1), dec!(1000))
        .paid(dec!(1000))
        .build();
    let entries = build_entries_for_invoice(&invoice, &directory, &book, &rules);
    assert_eq!(entries[0].payment_status, PaymentStatus::Due);
    entries
}

fn voucher_for(
    entries: &[domain_settlement::CommissionEntry],
    amounts: &[rust_decimal::Decimal],
) -> PaymentVoucher {
    let lines = entries
        .iter()
        .zip(amounts)
        .map(|(e, amt)| VoucherLine {
            entry: e.id,
            amount: Money::new(*amt, Currency::USD),
        })
        .collect();
    let mut voucher = PaymentVoucher::new(
        entries[0].agent,
        CompanyCode::from("ACME"),
        date(2024, 4, 1),
        Currency::USD,
        lines,
    );
    voucher.submit().unwrap();
    voucher
}

#[test]
fn partial_then_full_payment() {
    let mut entries = due_entry();
    let first = voucher_for(&entries, &[dec!(40)]);
    apply_voucher(&first, &mut entries).unwrap();
    assert_eq!(entries[0].payment_status, PaymentStatus::PartiallyPaid);
    assert_eq!(entries[0].outstanding().amount(), dec!(60));

    let second = voucher_for(&entries, &[dec!(60)]);
    apply_voucher(&second, &mut entries).unwrap();
    assert_eq!(entries[0].payment_status, PaymentStatus::Paid);
    entries[0].check_invariants().unwrap();
}

#[test]
fn exact_payment_settles_in_one_step() {
    let mut entries = due_entry();
    let voucher = voucher_for(&entries, &[dec!(100)]);
    apply_voucher(&voucher, &mut entries).unwrap();
    assert_eq!(entries[0].payment_status, PaymentStatus::Paid);
    assert!(entries[0].outstanding().is_zero());
}

#[test]
fn overpayment_leaves_batch_untouched() {
    let mut entries = due_entry();
    let voucher = voucher_for(&entries, &[dec!(150)]);
    let result = apply_voucher(&voucher, &mut entries);
    assert!(matches!(
        result,
        Err(SettlementError::PaymentExceedsCommission { .. })
    ));
    assert_eq!(entries[0].payment_status, PaymentStatus::Due);
    assert!(entries[0].paid_amount.is_zero());
}

#[test]
fn unsubmitted_voucher_rejected() {
    let mut entries = due_entry();
    let voucher = PaymentVoucher::new(
        entries[0].agent,
        CompanyCode::from("ACME"),
        date(2024, 4, 1),
        Currency::USD,
        vec![VoucherLine {
            entry: entries[0].id,
            amount: Money::new(dec!(50), Currency::USD),
        }],
    );
    assert!(matches!(
        apply_voucher(&voucher, &mut entries),
        Err(SettlementError::VoucherNotSubmitted)
    ));
}

#[test]
fn cancelled_voucher_reverts_entries() {
    let mut entries = due_entry();
    let voucher = voucher_for(&entries, &[dec!(100)]);
    apply_voucher(&voucher, &mut entries).unwrap();
    assert_eq!(entries[0].payment_status, PaymentStatus::Paid);

    revert_voucher(&voucher, &mut entries).unwrap();
    assert_eq!(entries[0].payment_status, PaymentStatus::Due);
    assert!(entries[0].paid_amount.is_zero());
    entries[0].check_invariants().unwrap();
}

#[test]
fn revert_of_unapplied_voucher_rejected() {
    let mut entries = due_entry();
    let voucher = voucher_for(&entries, &[dec!(100)]);
    // Never applied, so nothing to revert
    assert!(revert_voucher(&voucher, &mut entries).is_err());
}

#[test]
fn paid_entry_cannot_be_cancelled_until_reverted() {
    let mut entries = due_entry();
    let voucher = voucher_for(&entries, &[dec!(100)]);
    apply_voucher(&voucher, &mut entries).unwrap();

    assert!(matches!(
        entries[0].cancel(),
        Err(SettlementError::CancelWithPayments { .. })
    ));

    revert_voucher(&voucher, &mut entries).unwrap();
    entries[0].cancel().unwrap();
    assert_eq!(entries[0].payment_status, PaymentStatus::Cancelled);
}
