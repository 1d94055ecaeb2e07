//! Integrity predicates for the chain.
//!
//! It currently provides:
//!
//! - [`integrity::verify_block`]: one block against its predecessor.
//! - [`integrity::verify_chain`]: a full sequence, genesis first.

pub mod integrity;

pub use integrity::{verify_block, verify_chain};
