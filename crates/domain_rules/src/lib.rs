//! Rules Domain - commission rule definitions and calculation
//!
//! A commission rule binds an agent and company to a set of per-item-group
//! rates over an effective-date window. The resolver picks the single rule
//! in force on a business date; the calculator turns a resolved rate and an
//! invoice line into a commission amount.

pub mod calculator;
pub mod error;
pub mod resolver;
pub mod rule;
pub mod tiers;

pub use calculator::{calculate_commission, LineInput};
pub use error::RuleError;
pub use resolver::{ResolvedRate, RuleSet};
pub use rule::{CalculationMethod, CommissionRule, ItemGroupRate, RuleStatus};
pub use tiers::{TierRate, TierSchedule};
