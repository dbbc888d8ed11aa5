//! Database infrastructure
//!
//! Postgres persistence behind repository types. Queries are bound at
//! runtime so the crate builds without a database; migrations are
//! embedded and run at startup.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{connect, run_migrations};
pub use repositories::{
    AgentRepository, AssignmentRepository, EntryRepository, RuleRepository, VoucherRepository,
};
