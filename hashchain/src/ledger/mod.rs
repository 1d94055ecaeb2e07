//! The hash chain and its process-wide accessor.
//!
//! This module provides:
//!
//! - the append-only [`chain::Chain`] and its genesis payload,
//! - the storage seam it writes through ([`store::BlockStore`]),
//! - the one-shot, lazily seeded accessor ([`global::LazyChain`],
//!   [`global::get_chain`]),
//! - integrity errors ([`error::IntegrityError`]).

pub mod chain;
pub mod error;
pub mod global;
pub mod store;

pub use chain::{Chain, GENESIS_DATA};
pub use error::IntegrityError;
pub use global::{LazyChain, get_chain, get_chain_or_init_with};
pub use store::BlockStore;
