//! Prometheus-backed metrics and HTTP exporter.
//!
//! This module defines a [`MetricsRegistry`] that owns a Prometheus
//! registry and the strongly-typed chain metrics, and an async HTTP
//! exporter that serves `/metrics` using `hyper`.

use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use parking_lot::Mutex;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    Method, Request, Response, StatusCode,
    body::Incoming,
    header::{self, HeaderValue},
    server::conn::http1,
    service::service_fn,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use prometheus::{
    self, Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Opts, Registry, TextEncoder,
};

/// Chain-related Prometheus metrics.
///
/// These are registered into a [`Registry`] and updated by whoever drives
/// appends (the explorer, the CLI demo).
#[derive(Clone)]
pub struct ChainMetrics {
    /// Number of blocks appended through [`ChainMetrics::observe_append`].
    /// The genesis block is seeded by the accessor and is not counted.
    pub blocks_appended: IntCounter,
    /// Current chain length. Only ever moves up.
    pub chain_height: IntGauge,
    /// Latency of a single append (lock, hash, push), in seconds.
    pub append_seconds: Histogram,
    /// Highest height reported so far; serializes gauge updates.
    height_high_water: Arc<Mutex<i64>>,
}

impl ChainMetrics {
    /// Registers chain metrics into the given `Registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let blocks_appended = IntCounter::with_opts(Opts::new(
            "blocks_appended_total",
            "Total number of blocks appended to the chain by this process",
        ))?;
        registry.register(Box::new(blocks_appended.clone()))?;

        let chain_height = IntGauge::with_opts(Opts::new(
            "chain_height",
            "Number of blocks in the chain, genesis included",
        ))?;
        registry.register(Box::new(chain_height.clone()))?;

        // Appends are in-memory; buckets start in the microsecond range.
        let append_seconds = Histogram::with_opts(
            HistogramOpts::new("append_seconds", "Time to append one block in seconds").buckets(
                vec![
                    0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01,
                    0.05,
                ],
            ),
        )?;
        registry.register(Box::new(append_seconds.clone()))?;

        Ok(Self {
            blocks_appended,
            chain_height,
            append_seconds,
            height_high_water: Arc::new(Mutex::new(0)),
        })
    }

    /// Records one append that took `elapsed_secs` and left the chain at
    /// `height` blocks.
    pub fn observe_append(&self, elapsed_secs: f64, height: usize) {
        self.blocks_appended.inc();
        self.append_seconds.observe(elapsed_secs);
        self.set_height(height);
    }

    /// Raises the height gauge to `height`. Stale, lower reports from
    /// concurrent appenders are ignored.
    pub fn set_height(&self, height: usize) {
        let height = i64::try_from(height).unwrap_or(i64::MAX);
        let mut high = self.height_high_water.lock();
        if height > *high {
            *high = height;
            self.chain_height.set(height);
        }
    }
}

/// Wrapper around a Prometheus registry and the chain metrics.
///
/// This is the main handle you pass around in the node. It can be wrapped
/// in an [`Arc`] and shared across threads/tasks.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Registry,
    pub chain: ChainMetrics,
}

impl MetricsRegistry {
    /// Creates a new `MetricsRegistry` with a fresh underlying `Registry`
    /// (namespaced `hashchain`) and registers the chain metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("hashchain".to_string()), None)?;
        let chain = ChainMetrics::register(&registry)?;
        Ok(Self { registry, chain })
    }

    /// Encodes all metrics in this registry into the Prometheus text format.
    pub fn gather_text(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("failed to encode Prometheus metrics: {e}");
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// Runs an HTTP server that exposes Prometheus metrics.
///
/// The server listens on `addr` and serves `GET /metrics` with the
/// Prometheus text exposition format. All other paths return 404.
///
/// This function is `async` and is intended to be spawned onto a Tokio
/// runtime, e.g.:
///
/// ```ignore
/// let registry = Arc::new(MetricsRegistry::new()?);
/// let addr: SocketAddr = "127.0.0.1:9898".parse()?;
/// tokio::spawn(run_prometheus_http_server(registry.clone(), addr));
/// ```
pub async fn run_prometheus_http_server(
    metrics: Arc<MetricsRegistry>,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let metrics = metrics.clone();

        tokio::spawn(async move {
            let svc = service_fn(move |req| {
                let metrics = metrics.clone();
                handle_request(req, metrics)
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, svc).await {
                tracing::warn!("prometheus HTTP server error: {err}");
            }
        });
    }
}

async fn handle_request(
    req: Request<Incoming>,
    metrics: Arc<MetricsRegistry>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    match (req.method(), req.uri().path()) {
        (&Method::GET, "/metrics") => {
            let mut resp = Response::new(Full::new(Bytes::from(metrics.gather_text())));
            resp.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; version=0.0.4"),
            );
            Ok(resp)
        }
        _ => {
            let mut resp = Response::new(Full::new(Bytes::from("not found")));
            *resp.status_mut() = StatusCode::NOT_FOUND;
            Ok(resp)
        }
    }
}
