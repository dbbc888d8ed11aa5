//! HTTP API Layer
//!
//! REST surface for commission management using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **DTOs**: Request/Response data transfer objects
//! - **Commands**: Persists what the domain event handlers decide
//! - **Jobs**: Scheduled work (entry refresh, statements, reports)
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod commands;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod notify;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::NotificationSender;

use crate::config::ApiConfig;
use crate::handlers::{agents, assignments, entries, health, invoices, rules, vouchers};
use crate::notify::LogNotifier;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub notifier: Arc<dyn NotificationSender>,
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    create_router_with_notifier(pool, config, Arc::new(LogNotifier))
}

/// Creates the router with a custom notification sender, used by tests
pub fn create_router_with_notifier(
    pool: PgPool,
    config: ApiConfig,
    notifier: Arc<dyn NotificationSender>,
) -> Router {
    let state = AppState {
        pool,
        config,
        notifier,
    };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let agent_routes = Router::new()
        .route("/", post(agents::create_agent))
        .route("/", get(agents::list_agents))
        .route("/:id", get(agents::get_agent));

    let rule_routes = Router::new()
        .route("/", post(rules::create_rule))
        .route("/:id", get(rules::get_rule))
        .route("/:id/deactivate", post(rules::deactivate_rule));

    let assignment_routes = Router::new()
        .route("/", post(assignments::create_assignment))
        .route("/", get(assignments::list_assignments));

    // Hooks the host ERP posts into on document lifecycle events
    let invoice_routes = Router::new()
        .route("/submitted", post(invoices::invoice_submitted))
        .route("/payment-updated", post(invoices::invoice_payment_updated))
        .route("/:id/cancelled", post(invoices::invoice_cancelled));

    let voucher_routes = Router::new()
        .route("/", post(vouchers::create_voucher))
        .route("/:id/cancel", post(vouchers::cancel_voucher));

    let entry_routes = Router::new()
        .route("/", get(entries::list_entries))
        .route("/payables", get(entries::list_payables))
        .route("/summary", get(entries::agent_summary));

    let api_routes = Router::new()
        .nest("/agents", agent_routes)
        .nest("/rules", rule_routes)
        .nest("/assignments", assignment_routes)
        .nest("/invoices", invoice_routes)
        .nest("/vouchers", voucher_routes)
        .nest("/entries", entry_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
