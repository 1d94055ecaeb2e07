//! Lazily seeded, process-wide chain handle.
//!
//! [`LazyChain`] moves through three states: uninitialized, initializing
//! (exactly one caller is running the seed closure while every other caller
//! blocks on it), and ready. Ready is terminal. Once ready, lookups are a
//! single atomic load with no locking.
//!
//! Whatever the seed closure returns, the chain handed out always has a
//! genesis block at height 0.

use std::sync::OnceLock;

use crate::validation::verify_chain;

use super::chain::{Chain, GENESIS_DATA};

/// One-shot holder of a [`Chain`].
pub struct LazyChain {
    cell: OnceLock<Chain>,
}

impl LazyChain {
    /// Creates an uninitialized holder. Usable in `static` items.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the chain, creating it with only the genesis block on first
    /// use.
    pub fn get(&self) -> &Chain {
        self.get_or_init_with(Chain::new)
    }

    /// Returns the chain, running `init` if nobody has initialized it yet.
    ///
    /// Among racing first callers exactly one `init` runs; the others wait
    /// for it and receive the same chain. Later calls never run `init`. If
    /// `init` yields an empty chain it is seeded with [`GENESIS_DATA`]
    /// before anyone can observe it. A non-empty chain that fails
    /// [`verify_chain`] is discarded and replaced by a fresh genesis-only
    /// chain.
    pub fn get_or_init_with<F>(&self, init: F) -> &Chain
    where
        F: FnOnce() -> Chain,
    {
        if let Some(chain) = self.cell.get() {
            return chain;
        }

        self.cell.get_or_init(|| {
            let mut chain = init();
            if chain.is_empty() {
                chain.append(GENESIS_DATA);
            } else if let Err(e) = verify_chain(&chain.all_blocks()) {
                tracing::warn!(error = %e, "discarding invalid initial chain");
                chain = Chain::with_genesis();
            }
            tracing::info!(
                height = chain.len(),
                genesis = %chain.block(0).map(|b| b.hash().to_hex()).unwrap_or_default(),
                "chain initialized"
            );
            chain
        })
    }

    /// Returns the chain if it is already initialized. Never initializes.
    pub fn try_get(&self) -> Option<&Chain> {
        self.cell.get()
    }
}

impl Default for LazyChain {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_CHAIN: LazyChain = LazyChain::new();

/// Process-wide chain handle.
///
/// The first call, from whichever thread gets there first, creates the
/// chain and appends the genesis block. Every caller gets the same chain.
pub fn get_chain() -> &'static Chain {
    GLOBAL_CHAIN.get()
}

/// Process-wide chain handle, initialized from `init` if this is the first
/// access.
///
/// Meant for collaborators that restore a chain at startup (for example with
/// [`Chain::from_blocks`]) before anything else touches it. Has no effect if
/// the chain is already initialized.
pub fn get_chain_or_init_with<F>(init: F) -> &'static Chain
where
    F: FnOnce() -> Chain,
{
    GLOBAL_CHAIN.get_or_init_with(init)
}
