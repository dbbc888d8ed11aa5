//! Agent Domain - sales agent master data
//!
//! A sales agent is the party that earns commission. The master record
//! carries the configuration the settlement pipeline consults before any
//! entry is created: whether commission is enabled at all, whether it
//! becomes due on invoice payment, and how the agent wants statements.

pub mod agent;
pub mod directory;
pub mod statements;
pub mod error;

pub use agent::{AgentStatus, SalesAgent, StatementFrequency};
pub use directory::AgentDirectory;
pub use error::AgentError;
pub use statements::{CommissionStatement, StatementLine};
