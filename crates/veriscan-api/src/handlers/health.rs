//! Health endpoint, the one route that never requires auth.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use veriscan_extraction::check_api;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub api_configured: bool,
    pub message: String,
}

/// Reports whether the extraction credential looks usable. No network call.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (api_configured, message) = check_api(&state.config);
    Json(HealthResponse {
        status: if api_configured { "healthy" } else { "degraded" },
        api_configured,
        message,
    })
}
