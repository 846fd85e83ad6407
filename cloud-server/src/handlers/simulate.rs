//! Simulation handlers

use axum::{extract::State, Json};
use serde::Serialize;

use outage_sim_core::{DerivedMetrics, Indicators, Narration, RunRecord, ScenarioInput, ScenarioParams};

use crate::extract::AppJson;
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub record: RunRecord,
    pub narration: Vec<String>,
    pub indicators: Indicators,
}

/// Form reset state
pub async fn defaults() -> Json<ScenarioParams> {
    Json(ScenarioParams::default())
}

/// Validate, compute and record a run
pub async fn simulate(
    State(state): State<AppState>,
    AppJson(params): AppJson<ScenarioParams>,
) -> AppResult<Json<SimulateResponse>> {
    let input = ScenarioInput::new(params)?;
    let record = state.session.write().run(input).clone();

    tracing::info!(
        run_id = %record.run_id(),
        preset = %record.input().preset_id(),
        rto_min = record.metrics().rto_min,
        breached = record.metrics().slo_breached,
        "Simulation recorded"
    );

    let narration = Narration::new(&record).lines();
    let indicators = Indicators::for_run(&record);

    Ok(Json(SimulateResponse {
        record,
        narration,
        indicators,
    }))
}

/// Metrics only; nothing is recorded
pub async fn compute(
    State(state): State<AppState>,
    AppJson(params): AppJson<ScenarioParams>,
) -> AppResult<Json<DerivedMetrics>> {
    let input = ScenarioInput::new(params)?;
    let metrics = state.session.read().compute(&input);
    Ok(Json(metrics))
}
