//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    has_latest_run: bool,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        has_latest_run: state.session.read().latest().is_some(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
