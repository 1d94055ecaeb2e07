//! Top-level configuration for processes embedding the chain.
//!
//! The chain itself has nothing to tune: the genesis payload and the hash
//! function are fixed. What is configurable is the ambient plumbing around
//! it, currently the Prometheus exporter.
//!
//! Values come from defaults, optionally overridden by environment
//! variables:
//!
//! - `HASHCHAIN_METRICS_ENABLED` (`true`/`false`, `1`/`0`),
//! - `HASHCHAIN_METRICS_ADDR` (socket address, e.g. `127.0.0.1:9898`).
//!
//! Unparseable values are logged and ignored.

use std::net::SocketAddr;

/// Environment variable toggling the metrics exporter.
pub const ENV_METRICS_ENABLED: &str = "HASHCHAIN_METRICS_ENABLED";
/// Environment variable overriding the metrics listen address.
pub const ENV_METRICS_ADDR: &str = "HASHCHAIN_METRICS_ADDR";

/// Configuration for the Prometheus metrics exporter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether to run a `/metrics` HTTP exporter.
    pub enabled: bool,
    /// Address to bind the metrics HTTP server to.
    pub listen_addr: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        // Safe to unwrap: this is a fixed, valid address literal.
        let addr: SocketAddr = "127.0.0.1:9898"
            .parse()
            .expect("hard-coded metrics listen address should parse");
        Self {
            enabled: true,
            listen_addr: addr,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainConfig {
    pub metrics: MetricsConfig,
}

impl ChainConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(ENV_METRICS_ENABLED) {
            match parse_bool(&raw) {
                Some(enabled) => cfg.metrics.enabled = enabled,
                None => tracing::warn!(
                    key = ENV_METRICS_ENABLED,
                    value = %raw,
                    "ignoring invalid boolean"
                ),
            }
        }

        if let Some(raw) = lookup(ENV_METRICS_ADDR) {
            match raw.parse::<SocketAddr>() {
                Ok(addr) => cfg.metrics.listen_addr = addr,
                Err(e) => tracing::warn!(
                    key = ENV_METRICS_ADDR,
                    value = %raw,
                    "ignoring invalid address: {e}"
                ),
            }
        }

        cfg
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
