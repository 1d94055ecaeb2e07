// explorer/src/main.rs

//! Explorer binary.
//!
//! This binary exposes a small HTTP API on top of the `hashchain` crate:
//!
//! - `GET /health`
//! - `GET /blocks`, `POST /blocks`, `GET /blocks/{height}`
//! - `GET /verify`
//!
//! It serves the process-wide chain from `hashchain::get_chain()` and runs a
//! Prometheus metrics exporter on `/metrics`.

mod config;
mod routes;
mod state;

use std::sync::Arc;

use tokio::signal;

use config::ApiConfig;
use hashchain::{ChainConfig, MetricsRegistry, get_chain, run_prometheus_http_server};
use state::{AppState, SharedState};

#[tokio::main]
async fn main() {
    // Basic tracing setup.
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "explorer=info,hashchain=info".to_string()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let api_cfg = ApiConfig::from_env();
    let chain_cfg = ChainConfig::from_env();

    // ---------------------------
    // Metrics
    // ---------------------------

    let metrics = Arc::new(
        MetricsRegistry::new()
            .map_err(|e| format!("failed to initialise metrics registry: {e}"))?,
    );

    if chain_cfg.metrics.enabled {
        let metrics_clone = metrics.clone();
        let addr = chain_cfg.metrics.listen_addr;
        tokio::spawn(async move {
            if let Err(e) = run_prometheus_http_server(metrics_clone, addr).await {
                tracing::error!("metrics HTTP server error: {e}");
            }
        });
        tracing::info!("metrics exporter listening on http://{}/metrics", addr);
    }

    // ---------------------------
    // Chain (seeds genesis on first access)
    // ---------------------------

    let chain = get_chain();
    metrics.chain.set_height(chain.len());

    let app_state: SharedState = Arc::new(AppState {
        chain,
        metrics: metrics.clone(),
    });

    // ---------------------------
    // HTTP server
    // ---------------------------

    let app = routes::router(app_state);

    tracing::info!("explorer listening on http://{}", api_cfg.listen_addr);

    let listener = tokio::net::TcpListener::bind(api_cfg.listen_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", api_cfg.listen_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("API server error: {e}"))?;

    Ok(())
}

/// Waits for Ctrl-C and returns, used for graceful shutdown.
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
