//! Storage backends for the chain.
//!
//! This module provides concrete implementations of the
//! [`crate::ledger::store::BlockStore`] trait. Only an in-memory store
//! ([`mem::InMemoryBlockStore`]) exists; a chain loaded from elsewhere is
//! handed over through [`crate::ledger::Chain::from_blocks`].

pub mod mem;

pub use mem::InMemoryBlockStore;
