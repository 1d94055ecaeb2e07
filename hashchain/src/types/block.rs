// hashchain/src/types/block.rs

//! Block type and hashing.
//!
//! A [`Block`] carries an opaque string payload together with its own
//! digest and the digest of its predecessor. The digest is
//!
//! ```text
//! SHA-256(data || hex(prev_hash))
//! ```
//!
//! where `hex(prev_hash)` is the lowercase hex rendering of the previous
//! block's digest, or the empty string for the genesis block. The same
//! canonical input is used everywhere a block digest is computed or
//! re-checked.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Hash256;

/// Strongly-typed block hash.
///
/// This is the content hash of a [`Block`], see [`Block::compute_hash`].
/// Wrapping the underlying [`Hash256`] avoids passing raw byte arrays or
/// hex strings around in public APIs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub Hash256);

impl BlockHash {
    /// Lowercase hexadecimal rendering of the digest.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A sealed ledger record.
///
/// Blocks are constructed fully formed by [`Block::new`]; the digest is
/// computed during construction and no mutators are exposed afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Block {
    data: String,
    hash: BlockHash,
    /// `None` only for the genesis block. Serialized as `""` in that case.
    #[serde(with = "prev_hash_serde")]
    prev_hash: Option<BlockHash>,
}

impl Block {
    /// Builds a block on top of `prev_hash` and seals it.
    ///
    /// Any payload is accepted, including the empty string.
    pub fn new(data: impl Into<String>, prev_hash: Option<BlockHash>) -> Self {
        let data = data.into();
        let hash = Self::compute_hash(&data, prev_hash.as_ref());
        Self {
            data,
            hash,
            prev_hash,
        }
    }

    /// Computes the canonical digest for `(data, prev_hash)`.
    ///
    /// Pure and deterministic: the same inputs always give the same digest,
    /// which is what later integrity checks rely on.
    pub fn compute_hash(data: &str, prev_hash: Option<&BlockHash>) -> BlockHash {
        let prev_hex = prev_hash.map(BlockHash::to_hex).unwrap_or_default();
        BlockHash(Hash256::compute_concat(&[
            data.as_bytes(),
            prev_hex.as_bytes(),
        ]))
    }

    /// Caller-supplied payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// This block's digest.
    pub fn hash(&self) -> &BlockHash {
        &self.hash
    }

    /// Digest of the preceding block, `None` for genesis.
    pub fn prev_hash(&self) -> Option<&BlockHash> {
        self.prev_hash.as_ref()
    }

    /// Previous digest as hex, or the empty string for genesis.
    pub fn prev_hash_hex(&self) -> String {
        self.prev_hash.map(|h| h.to_hex()).unwrap_or_default()
    }

    /// Returns `true` if this block has no predecessor.
    pub fn is_genesis(&self) -> bool {
        self.prev_hash.is_none()
    }

    /// Recomputes the digest from the block's contents and compares it
    /// with the stored one.
    ///
    /// Only blocks obtained through deserialization can fail this check.
    pub fn verify_hash(&self) -> bool {
        Self::compute_hash(&self.data, self.prev_hash.as_ref()) == self.hash
    }
}

/// Serde adapter mapping `Option<BlockHash>` to a hex string, `""` for `None`.
mod prev_hash_serde {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::BlockHash;
    use crate::types::Hash256;

    pub fn serialize<S: Serializer>(
        value: &Option<BlockHash>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(hash) => serializer.serialize_str(&hash.to_hex()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BlockHash>, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        Hash256::from_hex(&s)
            .map(|h| Some(BlockHash(h)))
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_HEX: &str = "81ddc8d248b2dccdd3fdd5e84f0cad62b08f2d10b57f9a831c13451e5c5c80a5";

    #[test]
    fn block_hash_is_deterministic() {
        let prev = BlockHash(Hash256([1u8; crate::types::HASH_LEN]));
        let h1 = Block::compute_hash("payload", Some(&prev));
        let h2 = Block::compute_hash("payload", Some(&prev));
        assert_eq!(h1, h2);

        let b1 = Block::new("payload", Some(prev));
        let b2 = Block::new("payload", Some(prev));
        assert_eq!(b1.hash(), b2.hash());
    }

    #[test]
    fn genesis_digest_hashes_payload_only() {
        let genesis = Block::new("Genesis", None);
        assert!(genesis.is_genesis());
        assert_eq!(genesis.prev_hash_hex(), "");
        assert_eq!(genesis.hash().to_hex(), GENESIS_HEX);
    }

    #[test]
    fn digest_binds_to_previous_hex_digest() {
        let genesis = Block::new("Genesis", None);
        let first = Block::new("First", Some(*genesis.hash()));

        assert_eq!(first.prev_hash(), Some(genesis.hash()));
        assert_eq!(
            first.hash().to_hex(),
            "901681190043c0684cea9d890e988cacf83f0dc18e80a9129bd39704a25d6ada"
        );

        // Same payload on a different parent gives a different digest.
        let other = Block::new("First", None);
        assert_ne!(other.hash(), first.hash());
    }

    #[test]
    fn empty_payload_is_accepted() {
        let block = Block::new("", None);
        assert_eq!(block.data(), "");
        assert!(block.verify_hash());
    }

    #[test]
    fn json_roundtrip_keeps_genesis_prev_hash_empty() {
        let genesis = Block::new("Genesis", None);
        let json = serde_json::to_value(&genesis).expect("serialize");
        assert_eq!(json["prev_hash"], "");
        assert_eq!(json["hash"], GENESIS_HEX);

        let back: Block = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, genesis);
    }

    #[test]
    fn tampered_block_fails_hash_check() {
        let json = serde_json::json!({
            "data": "forged",
            "hash": GENESIS_HEX,
            "prev_hash": "",
        });
        let block: Block = serde_json::from_value(json).expect("deserialize");
        assert!(!block.verify_hash());
    }
}
