//! In-memory block store.
//!
//! This is the store backing the process-wide chain. It keeps all blocks
//! in a `Vec` in insertion order, so height `i` is simply index `i`.

use crate::ledger::store::BlockStore;
use crate::types::Block;

/// In-memory implementation of [`BlockStore`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryBlockStore {
    blocks: Vec<Block>,
}

impl InMemoryBlockStore {
    /// Creates a new, empty in-memory block store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockStore for InMemoryBlockStore {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn last(&self) -> Option<&Block> {
        self.blocks.last()
    }

    fn get(&self, height: usize) -> Option<&Block> {
        self.blocks.get(height)
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }

    fn blocks(&self) -> Vec<Block> {
        self.blocks.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get_preserve_insertion_order() {
        let mut store = InMemoryBlockStore::new();
        let a = Block::new("a", None);
        let b = Block::new("b", Some(*a.hash()));

        store.push(a.clone());
        store.push(b.clone());

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0), Some(&a));
        assert_eq!(store.get(1), Some(&b));
        assert_eq!(store.last(), Some(&b));
        assert!(store.get(2).is_none());
    }

    #[test]
    fn blocks_returns_an_independent_copy() {
        let mut store = InMemoryBlockStore::new();
        store.push(Block::new("a", None));

        let mut copy = store.blocks();
        copy.clear();

        assert_eq!(store.len(), 1);
    }
}
