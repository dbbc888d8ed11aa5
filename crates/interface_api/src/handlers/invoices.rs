//! Invoice hook handlers
//!
//! The host ERP posts here from its document lifecycle: submission,
//! payment updates, and cancellation. Each hook loads the relevant
//! state, runs the pure event handler, and persists the resulting
//! commands.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::InvoiceId;
use domain_settlement::{handle_event, HookContext, HookEvent};
use infra_db::{AgentRepository, AssignmentRepository, EntryRepository, RuleRepository};

use crate::commands::{execute, CommandOutcome};
use crate::dto::invoices::InvoiceSnapshotDto;
use crate::error::ApiError;
use crate::AppState;

/// Invoice submitted: create commission entries for entitled agents
pub async fn invoice_submitted(
    State(state): State<AppState>,
    Json(dto): Json<InvoiceSnapshotDto>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let invoice = dto.into_domain()?;
    let directory = AgentRepository::new(state.pool.clone()).load_directory().await?;
    let assignments = AssignmentRepository::new(state.pool.clone())
        .load_book(&invoice.company)
        .await?;
    let rules = RuleRepository::new(state.pool.clone())
        .load_rule_set(&invoice.company)
        .await?;
    let entries = EntryRepository::new(state.pool.clone())
        .list_for_invoice(invoice.id)
        .await?;

    let ctx = HookContext {
        directory: &directory,
        assignments: &assignments,
        rules: &rules,
        entries: &entries,
    };
    let commands = handle_event(&HookEvent::InvoiceSubmitted(invoice), &ctx)?;
    Ok(Json(execute(&state, commands).await?))
}

/// Invoice payment changed: refresh entry due states
pub async fn invoice_payment_updated(
    State(state): State<AppState>,
    Json(dto): Json<InvoiceSnapshotDto>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let invoice = dto.into_domain()?;
    let directory = AgentRepository::new(state.pool.clone()).load_directory().await?;
    let assignments = AssignmentRepository::new(state.pool.clone())
        .load_book(&invoice.company)
        .await?;
    let rules = RuleRepository::new(state.pool.clone())
        .load_rule_set(&invoice.company)
        .await?;
    let entries = EntryRepository::new(state.pool.clone())
        .list_for_invoice(invoice.id)
        .await?;

    let ctx = HookContext {
        directory: &directory,
        assignments: &assignments,
        rules: &rules,
        entries: &entries,
    };
    let commands = handle_event(&HookEvent::InvoicePaymentUpdated(invoice), &ctx)?;
    Ok(Json(execute(&state, commands).await?))
}

/// Invoice cancelled: cancel its entries, refused once commission was paid
pub async fn invoice_cancelled(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let invoice_id = InvoiceId::from(id);
    let directory = AgentRepository::new(state.pool.clone()).load_directory().await?;
    let entries = EntryRepository::new(state.pool.clone())
        .list_for_invoice(invoice_id)
        .await?;

    // Cancellation needs no rules or assignments
    let assignments = domain_assignment::AssignmentBook::new();
    let rules = domain_rules::RuleSet::new();
    let ctx = HookContext {
        directory: &directory,
        assignments: &assignments,
        rules: &rules,
        entries: &entries,
    };
    let commands = handle_event(&HookEvent::InvoiceCancelled(invoice_id), &ctx)?;
    Ok(Json(execute(&state, commands).await?))
}
