//! Recorded run handlers

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

use outage_sim_core::constants::REPORT_FILE_NAME;
use outage_sim_core::{RunRecord, SimError};

use crate::{AppResult, AppState};

/// Most recent run
pub async fn latest(State(state): State<AppState>) -> AppResult<Json<RunRecord>> {
    let record = state
        .session
        .read()
        .latest()
        .cloned()
        .ok_or(SimError::NoRecord)?;

    Ok(Json(record))
}

/// Most recent run as a CSV download
pub async fn latest_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let csv = state.session.read().latest_csv()?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
        ),
    ];

    Ok((headers, csv))
}
