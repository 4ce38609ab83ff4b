//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (data and palette are usable)
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
/// Returns 503 when the catalog is invalid or a pin category has no colour.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_catalog(&state) && check_palette(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let catalog_ok = check_catalog(&state);
    let palette_ok = check_palette(&state);

    let overall_status = match (catalog_ok, palette_ok) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        _ => "unhealthy",
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        catalog: status_word(catalog_ok),
        palette: status_word(palette_ok),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn status_word(ok: bool) -> String {
    if ok { "ok" } else { "error" }.to_string()
}

fn check_catalog(state: &AppState) -> bool {
    state.catalog.validate().is_ok()
}

fn check_palette(state: &AppState) -> bool {
    state
        .palette
        .verify_coverage(state.catalog.pins.iter().map(|p| p.category))
        .is_ok()
}
