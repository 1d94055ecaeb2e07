//! Integrity predicate for hash chains.
//!
//! Appends keep the chain linked by construction, so nothing here runs on
//! the append path. These checks are for sequences that come from
//! somewhere else (deserialized, restored from a store) and for the
//! explorer's `/verify` endpoint.

use crate::ledger::error::IntegrityError;
use crate::types::Block;

/// Checks a single block against its predecessor.
///
/// `prev` must be `None` exactly when `height == 0`.
pub fn verify_block(
    prev: Option<&Block>,
    block: &Block,
    height: usize,
) -> Result<(), IntegrityError> {
    if !block.verify_hash() {
        return Err(IntegrityError::HashMismatch { height });
    }

    match (prev, block.prev_hash()) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(IntegrityError::GenesisHasParent),
        (Some(_), None) => Err(IntegrityError::MissingParent { height }),
        (Some(parent), Some(found)) if found != parent.hash() => {
            Err(IntegrityError::BrokenLink {
                height,
                expected: *parent.hash(),
                found: *found,
            })
        }
        (Some(_), Some(_)) => Ok(()),
    }
}

/// Walks a whole chain, genesis first, failing on the first broken block.
pub fn verify_chain(blocks: &[Block]) -> Result<(), IntegrityError> {
    if blocks.is_empty() {
        return Err(IntegrityError::Empty);
    }

    let mut prev: Option<&Block> = None;
    for (height, block) in blocks.iter().enumerate() {
        verify_block(prev, block, height)?;
        prev = Some(block);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockHash, HASH_LEN, Hash256};

    fn linked(payloads: &[&str]) -> Vec<Block> {
        let mut blocks: Vec<Block> = Vec::new();
        for data in payloads {
            let prev = blocks.last().map(|b| *b.hash());
            blocks.push(Block::new(*data, prev));
        }
        blocks
    }

    #[test]
    fn accepts_well_formed_chain() {
        let blocks = linked(&["Genesis", "First", "Second"]);
        assert!(verify_chain(&blocks).is_ok());
    }

    #[test]
    fn rejects_empty_chain() {
        assert_eq!(verify_chain(&[]), Err(IntegrityError::Empty));
    }

    #[test]
    fn rejects_genesis_with_parent() {
        let bogus_parent = BlockHash(Hash256([7u8; HASH_LEN]));
        let blocks = vec![Block::new("Genesis", Some(bogus_parent))];
        assert_eq!(verify_chain(&blocks), Err(IntegrityError::GenesisHasParent));
    }

    #[test]
    fn rejects_second_root() {
        let mut blocks = linked(&["Genesis"]);
        blocks.push(Block::new("orphan", None));
        assert_eq!(
            verify_chain(&blocks),
            Err(IntegrityError::MissingParent { height: 1 })
        );
    }

    #[test]
    fn rejects_link_to_wrong_parent() {
        let mut blocks = linked(&["Genesis", "First"]);
        // Build the third block on genesis instead of on "First".
        let stale = Block::new("Second", Some(*blocks[0].hash()));
        blocks.push(stale);

        let err = verify_chain(&blocks).unwrap_err();
        match err {
            IntegrityError::BrokenLink {
                height,
                expected,
                found,
            } => {
                assert_eq!(height, 2);
                assert_eq!(&expected, blocks[1].hash());
                assert_eq!(&found, blocks[0].hash());
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_tampered_payload() {
        let blocks = linked(&["Genesis", "First"]);
        let mut json = serde_json::to_value(&blocks).expect("serialize");
        json[1]["data"] = serde_json::Value::from("Forged");
        let tampered: Vec<Block> = serde_json::from_value(json).expect("deserialize");

        assert_eq!(
            verify_chain(&tampered),
            Err(IntegrityError::HashMismatch { height: 1 })
        );
    }
}
