//! Payment voucher handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::{AgentId, CompanyCode, DocStatus, EntryId, Money, VoucherId};
use uuid::Uuid;
use validator::Validate;

use domain_settlement::{handle_event, HookContext, HookEvent, PaymentVoucher, VoucherLine};
use infra_db::{AgentRepository, EntryRepository, VoucherRepository};

use crate::commands::execute;
use crate::dto::vouchers::{CreateVoucherRequest, VoucherResponse};
use crate::error::ApiError;
use crate::AppState;

async fn run_voucher_event(
    state: &AppState,
    voucher: &PaymentVoucher,
    event: HookEvent,
) -> Result<(), ApiError> {
    let directory = AgentRepository::new(state.pool.clone()).load_directory().await?;
    let entry_repo = EntryRepository::new(state.pool.clone());
    let mut entries = Vec::with_capacity(voucher.lines.len());
    for line in &voucher.lines {
        entries.push(entry_repo.fetch(line.entry).await?);
    }

    let assignments = domain_assignment::AssignmentBook::new();
    let rules = domain_rules::RuleSet::new();
    let ctx = HookContext {
        directory: &directory,
        assignments: &assignments,
        rules: &rules,
        entries: &entries,
    };
    let commands = handle_event(&event, &ctx)?;
    execute(state, commands).await?;
    Ok(())
}

/// Creates and submits a payment voucher, settling its entries
pub async fn create_voucher(
    State(state): State<AppState>,
    Json(request): Json<CreateVoucherRequest>,
) -> Result<(StatusCode, Json<VoucherResponse>), ApiError> {
    request.validate()?;

    let currency = request
        .currency
        .parse()
        .map_err(|_| ApiError::Validation(format!("unknown currency {}", request.currency)))?;
    let lines = request
        .lines
        .into_iter()
        .map(|l| VoucherLine {
            entry: EntryId::from(l.entry_id),
            amount: Money::new(l.amount, currency),
        })
        .collect();

    let mut voucher = PaymentVoucher::new(
        AgentId::from(request.agent_id),
        CompanyCode::from(request.company),
        request.posting_date,
        currency,
        lines,
    );
    voucher.submit()?;

    // Entries move first; the voucher document is only stored once the
    // whole batch applied.
    run_voucher_event(&state, &voucher, HookEvent::VoucherSubmitted(voucher.clone())).await?;
    VoucherRepository::new(state.pool.clone()).insert(&voucher).await?;

    let total = voucher.total_amount()?.amount();
    Ok((
        StatusCode::CREATED,
        Json(VoucherResponse::from_voucher(&voucher, total)),
    ))
}

/// Cancels a voucher, reverting its payments
pub async fn cancel_voucher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VoucherResponse>, ApiError> {
    let repo = VoucherRepository::new(state.pool.clone());
    let mut voucher = repo.fetch(VoucherId::from(id)).await?;
    if voucher.doc_status.is_cancelled() {
        return Err(ApiError::Conflict("voucher is already cancelled".to_string()));
    }

    run_voucher_event(&state, &voucher, HookEvent::VoucherCancelled(voucher.clone())).await?;
    repo.set_doc_status(voucher.id, DocStatus::Cancelled).await?;
    voucher.doc_status = DocStatus::Cancelled;

    let total = voucher.total_amount()?.amount();
    Ok(Json(VoucherResponse::from_voucher(&voucher, total)))
}
