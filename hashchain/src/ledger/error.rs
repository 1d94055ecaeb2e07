use crate::types::BlockHash;

/// Error type returned when a block sequence breaks the hash-chain
/// invariants.
///
/// Heights are zero-based, genesis is height 0.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    /// A chain must contain at least the genesis block.
    #[error("chain is empty")]
    Empty,
    /// The first block claims to have a predecessor.
    #[error("genesis block has a previous hash")]
    GenesisHasParent,
    /// A non-genesis block has no previous hash.
    #[error("block at height {height} has no previous hash")]
    MissingParent { height: usize },
    /// The stored digest does not match the block contents.
    #[error("block at height {height} has a digest that does not match its contents")]
    HashMismatch { height: usize },
    /// The previous hash does not point at the preceding block.
    #[error("block at height {height} links to {found}, expected {expected}")]
    BrokenLink {
        height: usize,
        expected: BlockHash,
        found: BlockHash,
    },
}
