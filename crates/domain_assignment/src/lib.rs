//! Assignment Domain - which agents earn on which customers
//!
//! A customer assignment maps an agent to a customer (optionally scoped to
//! a territory) over an effective window. Exclusive assignments win
//! outright; otherwise priority orders the entitled agents.

pub mod assignment;
pub mod error;
pub mod resolver;

pub use assignment::{AssignmentStatus, CustomerAssignment};
pub use error::AssignmentError;
pub use resolver::{AgentEntitlement, AssignmentBook};
