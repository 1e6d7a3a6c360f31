//! Cost estimation endpoint

use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::response::EstimateResponse;

/// POST /api/agent - Forward a problem statement to the remote agent
pub async fn estimate_cost(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<EstimateResponse>> {
    state.agent().estimate(payload).await.map(Json)
}
