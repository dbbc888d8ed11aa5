//! Repository types, one per aggregate

mod agents;
mod assignments;
mod codes;
mod entries;
mod rules;
mod vouchers;

pub use agents::AgentRepository;
pub use assignments::AssignmentRepository;
pub use entries::EntryRepository;
pub use rules::RuleRepository;
pub use vouchers::VoucherRepository;
