//! Core Kernel - Foundational types for the commission system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Effective-window types for date-ranged configuration
//! - Strongly-typed identifiers and document lifecycle status
//! - Port abstractions for external collaborators

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod document;
pub mod ports;

pub use money::{Currency, Money, MoneyError};
pub use temporal::{EffectiveWindow, TemporalError};
pub use identifiers::{
    AgentId, AssignmentId, CompanyCode, CustomerId, EntryId, InvoiceId, ItemGroup, RuleId,
    Territory, VoucherId,
};
pub use document::DocStatus;
pub use ports::{NotificationSender, PortError};
