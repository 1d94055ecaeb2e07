//! Hash-chain library crate.
//!
//! This crate provides a minimal append-only ledger in which every block
//! commits to its predecessor's digest:
//!
//! - strongly-typed digests and sealed blocks (`types`),
//! - the append-only chain and its lazily seeded, process-wide accessor
//!   (`ledger`),
//! - block storage (`storage`),
//! - integrity predicates for restored or received sequences (`validation`),
//! - Prometheus-based metrics (`metrics`),
//! - and top-level process configuration (`config`).
//!
//! Collaborators (the CLI demo, the HTTP explorer) only ever call
//! [`get_chain`], [`Chain::append`], and [`Chain::all_blocks`].

pub mod config;
pub mod ledger;
pub mod metrics;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export top-level configuration types.
pub use config::{ChainConfig, MetricsConfig};

// Re-export the chain, its accessor, and its errors.
pub use ledger::{
    BlockStore, Chain, GENESIS_DATA, IntegrityError, LazyChain, get_chain, get_chain_or_init_with,
};

// Re-export storage backends.
pub use storage::InMemoryBlockStore;

// Re-export integrity predicates.
pub use validation::{verify_block, verify_chain};

// Re-export metrics registry and chain metrics.
pub use metrics::{ChainMetrics, MetricsRegistry, run_prometheus_http_server};

// Re-export domain types at the crate root for convenience.
pub use types::*;
