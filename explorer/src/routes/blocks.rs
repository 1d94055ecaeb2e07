use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use hashchain::Block;

use crate::state::SharedState;

/// Request body for `POST /blocks`.
#[derive(Debug, Deserialize)]
pub struct AppendRequest {
    /// Block payload. Any string is accepted, including `""`.
    pub data: String,
}

/// A block together with its position in the chain.
#[derive(Debug, Serialize)]
pub struct BlockResponse {
    pub height: usize,
    #[serde(flatten)]
    pub block: Block,
}

/// Response body for `GET /verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /blocks`
///
/// Every block, genesis first.
pub async fn list_blocks(State(state): State<SharedState>) -> Json<Vec<Block>> {
    Json(state.chain.all_blocks())
}

/// `GET /blocks/{height}`
pub async fn get_block(
    State(state): State<SharedState>,
    Path(height): Path<usize>,
) -> Result<Json<BlockResponse>, (StatusCode, String)> {
    state
        .chain
        .block(height)
        .map(|block| Json(BlockResponse { height, block }))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("no block at height {height}")))
}

/// `POST /blocks`
///
/// Appends the payload at the tail and returns the sealed block.
pub async fn append_block(
    State(state): State<SharedState>,
    Json(body): Json<AppendRequest>,
) -> (StatusCode, Json<BlockResponse>) {
    let start = Instant::now();
    let (height, block) = state.chain.append_indexed(body.data);
    let elapsed = start.elapsed().as_secs_f64();

    state.metrics.chain.observe_append(elapsed, height + 1);

    (StatusCode::CREATED, Json(BlockResponse { height, block }))
}

/// `GET /verify`
///
/// Re-checks every digest and link in the chain.
pub async fn verify(State(state): State<SharedState>) -> Json<VerifyResponse> {
    let height = state.chain.len();
    match state.chain.verify() {
        Ok(()) => Json(VerifyResponse {
            valid: true,
            height,
            error: None,
        }),
        Err(e) => {
            tracing::warn!("chain failed verification: {e}");
            Json(VerifyResponse {
                valid: false,
                height,
                error: Some(e.to_string()),
            })
        }
    }
}
