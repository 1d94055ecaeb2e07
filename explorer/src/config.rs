//! Explorer configuration.
//!
//! This only configures the HTTP listen address. Metrics settings come from
//! `hashchain::ChainConfig::from_env()`.

use std::net::SocketAddr;

/// Environment variable overriding the HTTP listen address.
pub const ENV_LISTEN_ADDR: &str = "EXPLORER_LISTEN_ADDR";

/// Configuration for the explorer HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to.
    pub listen_addr: SocketAddr,
}

impl Default for ApiConfig {
    fn default() -> Self {
        // Safe to unwrap: fixed, valid address literal.
        // Bind to all interfaces so a container port mapping (8081→8081) is
        // reachable from the host.
        let addr: SocketAddr = "0.0.0.0:8081"
            .parse()
            .expect("hard-coded API listen address should parse");
        Self { listen_addr: addr }
    }
}

impl ApiConfig {
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
        if let Some(raw) = lookup(ENV_LISTEN_ADDR) {
            match raw.parse::<SocketAddr>() {
                Ok(addr) => cfg.listen_addr = addr,
                Err(e) => tracing::warn!(
                    key = ENV_LISTEN_ADDR,
                    value = %raw,
                    "ignoring invalid address: {e}"
                ),
            }
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_addr_override() {
        let cfg = ApiConfig::from_lookup(|key| {
            (key == ENV_LISTEN_ADDR).then(|| "127.0.0.1:3000".to_string())
        });
        assert_eq!(cfg.listen_addr.port(), 3000);

        let fallback = ApiConfig::from_lookup(|_| Some("nope".to_string()));
        assert_eq!(fallback, ApiConfig::default());
    }
}
