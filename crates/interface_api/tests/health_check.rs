//! Router smoke tests
//!
//! These run without a database: the pool is lazy and only the
//! endpoints that never touch it are exercised.

use axum_test::TestServer;
use sqlx::postgres::PgPoolOptions;

use interface_api::{config::ApiConfig, create_router};

fn test_server() -> TestServer {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/commission_test")
        .expect("lazy pool never connects eagerly");
    let app = create_router(pool, ApiConfig::default());
    TestServer::new(app).expect("router builds")
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = test_server();
    let response = server.get("/api/v1/nonexistent").await;
    response.assert_status_not_found();
}
