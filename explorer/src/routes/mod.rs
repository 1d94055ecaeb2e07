//! HTTP routes served by the explorer.
//!
//! - `GET /health`
//! - `GET /blocks`, `POST /blocks`
//! - `GET /blocks/{height}`
//! - `GET /verify`

pub mod blocks;
pub mod health;

use axum::{Router, routing::get};

use crate::state::SharedState;

/// Builds the explorer router over `state`.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/blocks", get(blocks::list_blocks).post(blocks::append_block))
        .route("/blocks/{height}", get(blocks::get_block))
        .route("/verify", get(blocks::verify))
        .with_state(state)
}
