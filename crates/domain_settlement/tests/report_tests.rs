//! Report read-model tests

use rust_decimal_macros::dec;

use core_kernel::{Currency, CustomerId, Money};
use domain_settlement::{
    build_entries_for_invoice, payable_entries, summarize_by_agent, PaymentStatus,
};
use test_utils::{percentage_scenario, InvoiceBuilder};

#[test]
fn payables_cover_due_and_partially_paid_only() {
    let customer = CustomerId::new();
    let (_, directory, book, rules) = percentage_scenario(customer);

    let unpaid = InvoiceBuilder::new(customer)
        .line("TV-55", "Electronics", dec!(1), dec!(1000))
        .build();
    let paid = InvoiceBuilder::new(customer)
        .line("TV-55", "Electronics", dec!(1), dec!(2000))
        .paid(dec!(2000))
        .build();

    let mut entries = build_entries_for_invoice(&unpaid, &directory, &book, &rules);
    entries.extend(build_entries_for_invoice(&paid, &directory, &book, &rules));
    assert_eq!(entries.len(), 2);

    // Pending entry is excluded, Due entry shows up
    let rows = payable_entries(&entries);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].outstanding, dec!(200));

    // Partial payment keeps the entry in the payables
    let due_id = rows[0].entry;
    let entry = entries.iter_mut().find(|e| e.id == due_id).unwrap();
    entry
        .apply_payment(Money::new(dec!(50), Currency::USD))
        .unwrap();
    let rows = payable_entries(&entries);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].outstanding, dec!(150));
    assert_eq!(rows[0].payment_status, PaymentStatus::PartiallyPaid);
}

#[test]
fn agent_summary_buckets_by_status() {
    let customer = CustomerId::new();
    let (agent, directory, book, rules) = percentage_scenario(customer);

    let unpaid = InvoiceBuilder::new(customer)
        .line("TV-55", "Electronics", dec!(1), dec!(1000))
        .build();
    let paid = InvoiceBuilder::new(customer)
        .line("TV-55", "Electronics", dec!(1), dec!(2000))
        .paid(dec!(2000))
        .build();

    let mut entries = build_entries_for_invoice(&unpaid, &directory, &book, &rules);
    entries.extend(build_entries_for_invoice(&paid, &directory, &book, &rules));

    let due_id = entries
        .iter()
        .find(|e| e.payment_status == PaymentStatus::Due)
        .unwrap()
        .id;
    entries
        .iter_mut()
        .find(|e| e.id == due_id)
        .unwrap()
        .apply_payment(Money::new(dec!(80), Currency::USD))
        .unwrap();

    let summaries = summarize_by_agent(&entries);
    assert_eq!(summaries.len(), 1);
    let s = &summaries[0];
    assert_eq!(s.agent, agent.id);
    assert_eq!(s.entry_count, 2);
    assert_eq!(s.total_commission, dec!(300));
    assert_eq!(s.pending_amount, dec!(100));
    assert_eq!(s.due_amount, dec!(120));
    assert_eq!(s.paid_amount, dec!(80));
}

#[test]
fn cancelled_entries_drop_out_of_summaries() {
    let customer = CustomerId::new();
    let (_, directory, book, rules) = percentage_scenario(customer);
    let invoice = InvoiceBuilder::new(customer)
        .line("TV-55", "Electronics", dec!(1), dec!(1000))
        .build();

    let mut entries = build_entries_for_invoice(&invoice, &directory, &book, &rules);
    entries[0].cancel().unwrap();

    assert!(summarize_by_agent(&entries).is_empty());
    assert!(payable_entries(&entries).is_empty());
}
