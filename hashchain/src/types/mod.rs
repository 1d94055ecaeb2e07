//! Core domain types used by the ledger
//!
//! This module defines the strongly-typed 256-bit digest used throughout
//! the hash chain and re-exports the [`Block`] type. The goal is to avoid
//! "naked" byte buffers and hex strings in public APIs and instead use
//! domain-specific newtypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Block type and block digest.
pub mod block;

pub use block::{Block, BlockHash};

/// Length in bytes of all 256-bit hash types used in this module.
pub const HASH_LEN: usize = 32;

/// Strongly-typed 256-bit hash wrapper (SHA-256).
///
/// Always exactly [`HASH_LEN`] bytes long. It renders and serializes as a
/// lowercase hexadecimal string, which is the form used for display and
/// for comparing digests by eye.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hash256(#[serde(with = "hex::serde")] pub [u8; HASH_LEN]);

impl Hash256 {
    /// Computes a new [`Hash256`] as the SHA-256 hash of `data`.
    ///
    /// The result is deterministic for a given byte slice and is suitable
    /// for use as an identifier or content hash, but it is **not**
    /// a password hash or KDF.
    pub fn compute(data: &[u8]) -> Self {
        Self::compute_concat(&[data])
    }

    /// Computes the SHA-256 hash of the concatenation of `parts`.
    ///
    /// Equivalent to concatenating the slices into one buffer and calling
    /// [`Hash256::compute`], without the intermediate allocation.
    pub fn compute_concat(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Hash256(hasher.finalize().into())
    }

    /// Returns the underlying 32-byte hash as a borrowed array.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Lowercase hexadecimal rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a 64-character hex string into a [`Hash256`].
    pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
        if s.len() != HASH_LEN * 2 {
            return Err(HashParseError::Length(s.len()));
        }
        let mut arr = [0u8; HASH_LEN];
        hex::decode_to_slice(s, &mut arr)?;
        Ok(Hash256(arr))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Error returned when a hex string cannot be parsed into a [`Hash256`].
#[derive(Debug, thiserror::Error)]
pub enum HashParseError {
    #[error("expected {expected} hex characters, got {0}", expected = HASH_LEN * 2)]
    Length(usize),
    #[error("invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
}
