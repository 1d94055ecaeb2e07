use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::SharedState;

/// Liveness document, with the current chain length for quick inspection.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub height: usize,
}

/// `GET /health`
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        height: state.chain.len(),
    })
}
