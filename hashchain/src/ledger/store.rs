//! Storage abstraction used by the chain.

use crate::types::Block;

/// Append-only block storage.
///
/// Implementations only keep blocks in insertion order; linking and
/// hashing are the chain's job. There is intentionally no way to remove,
/// replace, or reorder stored blocks.
pub trait BlockStore {
    /// Appends a sealed block at the tail.
    fn push(&mut self, block: Block);

    /// Returns the tail block, if any.
    fn last(&self) -> Option<&Block>;

    /// Returns the block at `height` (0 is genesis), if present.
    fn get(&self, height: usize) -> Option<&Block>;

    /// Number of stored blocks.
    fn len(&self) -> usize;

    /// Returns `true` if no blocks are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies every block out, genesis first.
    fn blocks(&self) -> Vec<Block>;
}
