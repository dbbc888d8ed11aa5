//! Effective-date rule resolution
//!
//! At most one rule per agent, company, and item group is in force on any
//! business date. Insertion rejects overlapping active windows that share
//! an item group, so resolution is a filter plus a latest-effective-from
//! pick.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use core_kernel::{AgentId, CompanyCode, ItemGroup};

use crate::error::RuleError;
use crate::rule::{CalculationMethod, CommissionRule, RuleStatus};
use crate::tiers::TierSchedule;

/// The rate parameters in force for one agent, company, item group, and date
#[derive(Debug, Clone)]
pub struct ResolvedRate {
    pub rule_id: core_kernel::RuleId,
    pub method: CalculationMethod,
    pub commission_percentage: Decimal,
    pub fixed_amount: Decimal,
    pub tiers: Option<TierSchedule>,
    pub minimum_amount: Option<Decimal>,
    pub maximum_amount: Option<Decimal>,
}

/// An in-memory collection of commission rules with overlap protection
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CommissionRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule after validating it and checking that its window does
    /// not overlap another active rule sharing an item group for the same
    /// agent and company.
    pub fn insert(&mut self, rule: CommissionRule) -> Result<(), RuleError> {
        rule.validate()?;
        if rule.status == RuleStatus::Active {
            if let Some(existing) = self
                .rules
                .iter()
                .find(|r| r.status == RuleStatus::Active && r.conflicts_with(&rule))
            {
                return Err(RuleError::OverlappingRule {
                    existing: existing.id.to_string(),
                });
            }
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn rules(&self) -> &[CommissionRule] {
        &self.rules
    }

    /// Returns the active rule in force for the agent, company, and item
    /// group on the given date. Among candidates the latest effective-from
    /// wins, with creation time as the tie-break.
    pub fn rule_in_force(
        &self,
        agent: &AgentId,
        company: &CompanyCode,
        item_group: &ItemGroup,
        date: NaiveDate,
    ) -> Option<&CommissionRule> {
        self.rules
            .iter()
            .filter(|r| {
                r.status == RuleStatus::Active
                    && &r.agent == agent
                    && &r.company == company
                    && r.rate_for(item_group).is_some()
                    && r.window.contains(date)
            })
            .max_by_key(|r| (r.window.from, r.created_at))
    }

    /// Resolves the rate for one item group. Returns None when no rule
    /// covering the item group is in force; callers treat that as zero
    /// commission, not an error.
    pub fn resolve(
        &self,
        agent: &AgentId,
        company: &CompanyCode,
        item_group: &ItemGroup,
        date: NaiveDate,
    ) -> Option<ResolvedRate> {
        let Some(rule) = self.rule_in_force(agent, company, item_group, date) else {
            debug!(
                agent = %agent,
                item_group = %item_group,
                "no rule in force for item group"
            );
            return None;
        };
        let rate = rule.rate_for(item_group)?;
        Some(ResolvedRate {
            rule_id: rule.id,
            method: rule.method,
            commission_percentage: rate.commission_percentage,
            fixed_amount: rate.fixed_amount,
            tiers: rate.tiers.clone(),
            minimum_amount: rule.minimum_amount,
            maximum_amount: rule.maximum_amount,
        })
    }
}
