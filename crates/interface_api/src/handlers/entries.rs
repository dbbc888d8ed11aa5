//! Commission entry handlers

use axum::{
    extract::{Query, State},
    Json,
};

use core_kernel::AgentId;
use domain_settlement::{payable_entries, summarize_by_agent};
use infra_db::EntryRepository;

use crate::dto::entries::{EntryListQuery, EntryResponse, PayableResponse, SummaryResponse};
use crate::error::ApiError;
use crate::AppState;

/// Lists entries, filtered by agent and posting-date range
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntryListQuery>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let repo = EntryRepository::new(state.pool.clone());
    let entries = match query.agent_id {
        Some(agent) => {
            repo.list_for_agent(AgentId::from(agent), query.from, query.to)
                .await?
        }
        None => repo.list_payable().await?,
    };
    Ok(Json(entries.iter().map(EntryResponse::from).collect()))
}

/// Commission payables report
pub async fn list_payables(
    State(state): State<AppState>,
) -> Result<Json<Vec<PayableResponse>>, ApiError> {
    let entries = EntryRepository::new(state.pool.clone()).list_payable().await?;
    let rows = payable_entries(&entries);
    Ok(Json(rows.iter().map(PayableResponse::from).collect()))
}

/// Per-agent commission summary
pub async fn agent_summary(
    State(state): State<AppState>,
    Query(query): Query<EntryListQuery>,
) -> Result<Json<Vec<SummaryResponse>>, ApiError> {
    let repo = EntryRepository::new(state.pool.clone());
    let entries = match query.agent_id {
        Some(agent) => {
            repo.list_for_agent(AgentId::from(agent), query.from, query.to)
                .await?
        }
        None => repo.list_payable().await?,
    };
    let summaries = summarize_by_agent(&entries);
    Ok(Json(summaries.iter().map(SummaryResponse::from).collect()))
}
