//! Commission rule handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{AgentId, CompanyCode, EffectiveWindow, ItemGroup, RuleId};
use domain_rules::{
    CalculationMethod, CommissionRule, ItemGroupRate, RuleStatus, TierRate, TierSchedule,
};
use infra_db::RuleRepository;

use crate::dto::rules::{CreateRuleRequest, RuleResponse};
use crate::error::ApiError;
use crate::AppState;

fn parse_method(s: &str) -> Result<CalculationMethod, ApiError> {
    match s {
        "Percentage" => Ok(CalculationMethod::Percentage),
        "Fixed Amount" => Ok(CalculationMethod::FixedAmount),
        "Tiered" => Ok(CalculationMethod::Tiered),
        "Custom" => Ok(CalculationMethod::Custom),
        other => Err(ApiError::Validation(format!(
            "unknown calculation method {other}"
        ))),
    }
}

/// Creates a commission rule
///
/// The new rule is checked against the agent's existing rules so
/// overlapping effective windows are rejected with a conflict.
pub async fn create_rule(
    State(state): State<AppState>,
    Json(request): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), ApiError> {
    request.validate()?;

    let method = parse_method(&request.method)?;
    let window = EffectiveWindow::new(request.effective_from, request.effective_to)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let mut rates = Vec::with_capacity(request.rates.len());
    for rate in request.rates {
        let tiers = match rate.tiers {
            Some(tier_dtos) => Some(
                TierSchedule::new(
                    tier_dtos
                        .into_iter()
                        .map(|t| TierRate::new(t.from_amount, t.to_amount, t.commission_percentage))
                        .collect(),
                )
                .map_err(ApiError::from)?,
            ),
            None => None,
        };
        rates.push(ItemGroupRate {
            item_group: ItemGroup::from(rate.item_group),
            commission_percentage: rate.commission_percentage,
            fixed_amount: rate.fixed_amount,
            tiers,
        });
    }

    let company = CompanyCode::from(request.company);
    let rule = CommissionRule::new(AgentId::from(request.agent_id), company.clone(), method, window, rates)
        .with_bounds(request.minimum_amount, request.maximum_amount);

    let repo = RuleRepository::new(state.pool.clone());
    let mut existing = repo.load_rule_set(&company).await?;
    existing.insert(rule.clone())?;
    repo.insert(&rule).await?;

    Ok((StatusCode::CREATED, Json(RuleResponse::from(&rule))))
}

/// Gets a rule by id
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RuleResponse>, ApiError> {
    let rule = RuleRepository::new(state.pool.clone())
        .fetch(RuleId::from(id))
        .await?;
    Ok(Json(RuleResponse::from(&rule)))
}

/// Deactivates a rule
pub async fn deactivate_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    RuleRepository::new(state.pool.clone())
        .set_status(RuleId::from(id), RuleStatus::Inactive)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
