//! Factor table handler

use axum::{extract::State, Json};

use outage_sim_core::FactorTable;

use crate::AppState;

/// Lookup tables the model uses, for UIs that explain the numbers
pub async fn table(State(state): State<AppState>) -> Json<FactorTable> {
    Json(state.session.read().factor_table())
}
