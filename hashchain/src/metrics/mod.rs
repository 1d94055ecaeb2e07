//! Metrics and instrumentation for the chain.
//!
//! This module defines Prometheus-compatible metrics for chain appends and
//! exposes a small HTTP exporter that serves `/metrics` in Prometheus text
//! format.
//!
//! Typical usage in a process embedding the chain:
//!
//! ```ignore
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use std::time::Instant;
//! use hashchain::metrics::{MetricsRegistry, run_prometheus_http_server};
//!
//! let registry = Arc::new(MetricsRegistry::new()?);
//! let addr: SocketAddr = "127.0.0.1:9898".parse()?;
//!
//! // Spawn the HTTP exporter in the background:
//! tokio::spawn(run_prometheus_http_server(registry.clone(), addr));
//!
//! // Around each append:
//! let start = Instant::now();
//! chain.append("payload");
//! registry.chain.observe_append(start.elapsed().as_secs_f64(), chain.len());
//! ```

pub mod prometheus;

pub use self::prometheus::{ChainMetrics, MetricsRegistry, run_prometheus_http_server};
