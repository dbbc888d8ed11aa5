//! Request handlers, one module per resource

pub mod agents;
pub mod assignments;
pub mod entries;
pub mod health;
pub mod invoices;
pub mod rules;
pub mod vouchers;
