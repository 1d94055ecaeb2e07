//! Shared application state.

use std::sync::Arc;

use hashchain::{Chain, MetricsRegistry};

/// Shared state held by the API handlers.
///
/// This is wrapped in an [`Arc`] and passed to request handlers via Axum's
/// `State` extractor. The chain itself synchronizes appends and reads, so
/// no extra lock is needed here.
pub struct AppState {
    /// The chain being served; in the binary this is the process-wide one.
    pub chain: &'static Chain,
    /// Metrics registry shared with the `/metrics` exporter.
    pub metrics: Arc<MetricsRegistry>,
}

/// Thread-safe alias for `AppState`.
pub type SharedState = Arc<AppState>;
