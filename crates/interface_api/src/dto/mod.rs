//! Request and response bodies

pub mod agents;
pub mod assignments;
pub mod entries;
pub mod invoices;
pub mod rules;
pub mod vouchers;
