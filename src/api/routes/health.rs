//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dataset loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once a non-empty dataset is being served.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.dataset().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = state.dataset();
    let status = if dataset.is_empty() { "unhealthy" } else { "healthy" };

    Json(HealthResponse {
        status: status.to_string(),
        resorts: dataset.len(),
        countries: dataset.country_count(),
        source: dataset.source().to_string(),
        loaded_at: dataset.loaded_at(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_sessions: state.session_count().await,
    })
}
