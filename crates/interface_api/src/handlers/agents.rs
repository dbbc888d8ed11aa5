//! Agent handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{AgentId, CompanyCode};
use domain_agent::SalesAgent;
use infra_db::AgentRepository;

use crate::dto::agents::{AgentResponse, CreateAgentRequest};
use crate::error::ApiError;
use crate::AppState;

/// Creates an agent master record
pub async fn create_agent(
    State(state): State<AppState>,
    Json(request): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<AgentResponse>), ApiError> {
    request.validate()?;

    let mut agent = SalesAgent::new(
        request.agent_code,
        request.agent_name,
        CompanyCode::from(request.company),
        request.joining_date,
    );
    if let Some(email) = request.email {
        agent.email = Some(email);
    }
    if let Some(on_payment) = request.commission_on_payment {
        agent.commission_on_payment = on_payment;
    }
    if let Some(auto) = request.auto_create_entries {
        agent.auto_create_entries = auto;
    }
    agent.validate()?;

    AgentRepository::new(state.pool.clone()).insert(&agent).await?;
    Ok((StatusCode::CREATED, Json(AgentResponse::from(&agent))))
}

/// Lists all agents
pub async fn list_agents(
    State(state): State<AppState>,
) -> Result<Json<Vec<AgentResponse>>, ApiError> {
    let agents = AgentRepository::new(state.pool.clone()).list().await?;
    Ok(Json(agents.iter().map(AgentResponse::from).collect()))
}

/// Gets an agent by id
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgentResponse>, ApiError> {
    let agent = AgentRepository::new(state.pool.clone())
        .fetch(AgentId::from(id))
        .await?;
    Ok(Json(AgentResponse::from(&agent)))
}
