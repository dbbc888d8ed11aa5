//! Commission rule DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_rules::CommissionRule;

#[derive(Debug, Serialize, Deserialize)]
pub struct TierDto {
    pub from_amount: Decimal,
    pub to_amount: Option<Decimal>,
    pub commission_percentage: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateDto {
    pub item_group: String,
    #[serde(default)]
    pub commission_percentage: Decimal,
    #[serde(default)]
    pub fixed_amount: Decimal,
    pub tiers: Option<Vec<TierDto>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRuleRequest {
    pub agent_id: Uuid,
    #[validate(length(min = 1))]
    pub company: String,
    /// One of Percentage, Fixed Amount, Tiered, Custom
    pub method: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub minimum_amount: Option<Decimal>,
    pub maximum_amount: Option<Decimal>,
    #[validate(length(min = 1))]
    pub rates: Vec<RateDto>,
}

#[derive(Debug, Serialize)]
pub struct RuleResponse {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub company: String,
    pub status: String,
    pub method: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub minimum_amount: Option<Decimal>,
    pub maximum_amount: Option<Decimal>,
    pub rate_count: usize,
}

impl From<&CommissionRule> for RuleResponse {
    fn from(rule: &CommissionRule) -> Self {
        Self {
            id: rule.id.into(),
            agent_id: rule.agent.into(),
            company: rule.company.to_string(),
            status: format!("{:?}", rule.status),
            method: format!("{:?}", rule.method),
            effective_from: rule.window.from,
            effective_to: rule.window.to,
            minimum_amount: rule.minimum_amount,
            maximum_amount: rule.maximum_amount,
            rate_count: rule.rates.len(),
        }
    }
}
