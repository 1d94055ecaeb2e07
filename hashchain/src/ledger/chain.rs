//! The append-only chain.
//!
//! [`Chain`] owns a [`BlockStore`] behind a reader-writer lock. The write
//! lock is the single mutation path: "read tail digest, build block, push"
//! happens entirely under it, so two concurrent appends can never link to
//! the same stale tail. Readers take the read lock and copy the sequence
//! out, so they see either the state before an append or after it.

use parking_lot::RwLock;

use crate::storage::InMemoryBlockStore;
use crate::types::{Block, BlockHash};
use crate::validation::verify_chain;

use super::error::IntegrityError;
use super::store::BlockStore;

/// Payload of the block seeded at height 0.
pub const GENESIS_DATA: &str = "Genesis";

/// Ordered, append-only sequence of [`Block`]s.
///
/// Height `0` is genesis. For every height `i > 0`,
/// `blocks[i].prev_hash() == Some(blocks[i - 1].hash())`.
pub struct Chain<S = InMemoryBlockStore> {
    store: RwLock<S>,
}

impl Chain<InMemoryBlockStore> {
    /// Creates an empty chain with no genesis block.
    ///
    /// The first [`Chain::append`] on it produces the genesis block.
    pub fn new() -> Self {
        Self::from_store(InMemoryBlockStore::new())
    }

    /// Creates a chain already seeded with the [`GENESIS_DATA`] block.
    pub fn with_genesis() -> Self {
        let chain = Self::new();
        chain.append(GENESIS_DATA);
        chain
    }

    /// Rebuilds a chain from blocks loaded elsewhere.
    ///
    /// The sequence must be non-empty and pass [`verify_chain`]; nothing is
    /// re-hashed or re-linked on the way in.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, IntegrityError> {
        if let Err(e) = verify_chain(&blocks) {
            tracing::warn!(error = %e, "rejected chain restore");
            return Err(e);
        }

        let mut store = InMemoryBlockStore::new();
        let height = blocks.len();
        for block in blocks {
            store.push(block);
        }
        tracing::info!(height, "restored chain");
        Ok(Self::from_store(store))
    }
}

impl Default for Chain<InMemoryBlockStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BlockStore> Chain<S> {
    /// Wraps an existing store. The store's contents are taken as-is.
    pub fn from_store(store: S) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Appends `data` at the tail and returns a copy of the sealed block.
    ///
    /// Chain length grows by exactly one and the new block's previous hash
    /// is the digest of the former tail (`None` if the chain was empty).
    pub fn append(&self, data: impl Into<String>) -> Block {
        self.append_indexed(data).1
    }

    /// Like [`Chain::append`], also returning the height the block landed
    /// at. With concurrent writers this is the only reliable way to learn it.
    pub fn append_indexed(&self, data: impl Into<String>) -> (usize, Block) {
        let mut store = self.store.write();

        let prev_hash = store.last().map(|tail| *tail.hash());
        let block = Block::new(data, prev_hash);
        store.push(block.clone());
        let height = store.len() - 1;
        drop(store);

        tracing::debug!(height, hash = %block.hash(), "appended block");
        (height, block)
    }

    /// Returns every block, genesis first.
    ///
    /// The result is a copy; mutating it has no effect on the chain.
    pub fn all_blocks(&self) -> Vec<Block> {
        self.store.read().blocks()
    }

    /// Returns the block at `height`, if present.
    pub fn block(&self, height: usize) -> Option<Block> {
        self.store.read().get(height).cloned()
    }

    /// Digest of the tail block, `None` if the chain is empty.
    pub fn last_hash(&self) -> Option<BlockHash> {
        self.store.read().last().map(|b| *b.hash())
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns `true` if the chain holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Re-checks every digest and link on a snapshot of the chain.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        verify_chain(&self.all_blocks())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn fresh_chain_has_only_genesis() {
        let chain = Chain::with_genesis();
        let blocks = chain.all_blocks();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].data(), GENESIS_DATA);
        assert!(blocks[0].prev_hash().is_none());
        assert_eq!(blocks[0].prev_hash_hex(), "");
    }

    #[test]
    fn first_append_on_empty_chain_is_genesis() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert!(chain.last_hash().is_none());

        let block = chain.append("root");
        assert!(block.is_genesis());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn append_links_to_previous_tail() {
        let chain = Chain::with_genesis();
        let d0 = *chain.all_blocks()[0].hash();

        chain.append("First");
        let blocks = chain.all_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].data(), "First");
        assert_eq!(blocks[1].prev_hash(), Some(&d0));

        chain.append("Second");
        let blocks = chain.all_blocks();
        assert_eq!(blocks[2].prev_hash(), Some(blocks[1].hash()));
        assert!(chain.verify().is_ok());
    }

    #[test]
    fn append_grows_by_exactly_one() {
        let chain = Chain::with_genesis();
        for i in 0..10 {
            let before = chain.len();
            let payload = format!("payload-{i}");
            let block = chain.append(payload.clone());

            assert_eq!(chain.len(), before + 1);
            assert_eq!(block.data(), payload);
            assert_eq!(chain.last_hash(), Some(*block.hash()));
        }
    }

    #[test]
    fn append_indexed_reports_height() {
        let chain = Chain::with_genesis();
        let (h1, b1) = chain.append_indexed("First");
        let (h2, _) = chain.append_indexed("Second");

        assert_eq!((h1, h2), (1, 2));
        assert_eq!(chain.block(h1), Some(b1));
    }

    #[test]
    fn all_blocks_is_a_defensive_copy() {
        let chain = Chain::with_genesis();
        let mut snapshot = chain.all_blocks();
        snapshot.push(Block::new("injected", None));
        snapshot.remove(0);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.all_blocks()[0].data(), GENESIS_DATA);
    }

    #[test]
    fn block_by_height() {
        let chain = Chain::with_genesis();
        chain.append("First");

        assert_eq!(
            chain.block(1).map(|b| b.data().to_string()),
            Some("First".to_string())
        );
        assert!(chain.block(2).is_none());
    }

    #[test]
    fn concurrent_appends_keep_chain_linked() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 200;

        let chain = Chain::with_genesis();

        thread::scope(|s| {
            for t in 0..THREADS {
                let chain = &chain;
                s.spawn(move || {
                    for i in 0..PER_THREAD {
                        chain.append(format!("t{t}-{i}"));
                    }
                });
            }
        });

        assert_eq!(chain.len(), 1 + THREADS * PER_THREAD);
        assert!(chain.verify().is_ok());
    }

    #[test]
    fn readers_never_see_a_broken_snapshot() {
        let chain = Chain::with_genesis();

        thread::scope(|s| {
            s.spawn(|| {
                for i in 0..500 {
                    chain.append(format!("w{i}"));
                }
            });
            s.spawn(|| {
                for _ in 0..200 {
                    let snapshot = chain.all_blocks();
                    assert!(verify_chain(&snapshot).is_ok());
                }
            });
        });

        assert_eq!(chain.len(), 501);
    }

    #[test]
    fn from_blocks_restores_valid_sequence() {
        let original = Chain::with_genesis();
        original.append("First");
        original.append("Second");

        let restored = Chain::from_blocks(original.all_blocks()).expect("valid chain");
        assert_eq!(restored.all_blocks(), original.all_blocks());

        // Appending continues from the restored tail.
        let next = restored.append("Third");
        assert_eq!(next.prev_hash(), original.last_hash().as_ref());
    }

    #[test]
    fn from_blocks_rejects_invalid_sequences() {
        assert_eq!(
            Chain::from_blocks(Vec::new()).err(),
            Some(IntegrityError::Empty)
        );

        let genesis = Block::new(GENESIS_DATA, None);
        let orphan = Block::new("orphan", None);
        assert_eq!(
            Chain::from_blocks(vec![genesis, orphan]).err(),
            Some(IntegrityError::MissingParent { height: 1 })
        );
    }
}
