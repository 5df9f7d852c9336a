use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::controller::AppState;
use crate::telemetry::SystemLoad;

/// Service banner
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    service: &'static str,
    version: &'static str,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    #[serde(flatten)]
    load: SystemLoad,
    timestamp: chrono::DateTime<chrono::Utc>,
    uptime_seconds: u64,
    version: &'static str,
    workers: usize,
}

/// GET / - Service banner
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health - Health check endpoint
///
/// The dispatch core is stateless, so a process that answers is a healthy one.
/// Host CPU and memory load ride along for operators.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "running".to_string(),
        load: state.monitor.sample(),
        timestamp: chrono::Utc::now(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
        workers: state.cfg.server.workers,
    };

    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness probe for Kubernetes
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /health/live - Liveness probe for Kubernetes
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
