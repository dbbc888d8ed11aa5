//! Customer assignment handlers

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use core_kernel::{AgentId, CompanyCode, CustomerId, EffectiveWindow, Territory};
use domain_assignment::CustomerAssignment;
use infra_db::AssignmentRepository;

use crate::dto::assignments::{AssignmentResponse, CreateAssignmentRequest};
use crate::error::ApiError;
use crate::AppState;

/// Creates a customer assignment
///
/// Exclusivity is enforced against the customer's existing assignments:
/// a second active exclusive assignment with an overlapping window is a
/// conflict.
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(request): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), ApiError> {
    request.validate()?;

    let window = EffectiveWindow::new(request.effective_from, request.effective_to)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let company = CompanyCode::from(request.company);

    let mut assignment = CustomerAssignment::new(
        AgentId::from(request.agent_id),
        CustomerId::from(request.customer_id),
        company.clone(),
        window,
    );
    assignment.territory = request.territory.map(Territory::from);
    assignment.priority = request.priority;
    assignment.is_exclusive = request.is_exclusive;
    assignment.override_percentage = request.override_percentage;

    let repo = AssignmentRepository::new(state.pool.clone());
    let mut book = repo.load_book(&company).await?;
    book.insert(assignment.clone())?;
    repo.insert(&assignment).await?;

    Ok((StatusCode::CREATED, Json(AssignmentResponse::from(&assignment))))
}

/// Lists assignments for a company
pub async fn list_assignments(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<CompanyQuery>,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    let assignments = AssignmentRepository::new(state.pool.clone())
        .list_for_company(&CompanyCode::from(query.company))
        .await?;
    Ok(Json(assignments.iter().map(AssignmentResponse::from).collect()))
}

#[derive(Debug, serde::Deserialize)]
pub struct CompanyQuery {
    pub company: String,
}
