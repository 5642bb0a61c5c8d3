use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// A `(hash, number)` pair identifying a block on either chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId {
    /// The block hash.
    pub hash: B256,
    /// The block number.
    pub number: u64,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hash, self.number)
    }
}

/// A reference to a canonical L1 block.
///
/// The parent hash and timestamp are carried along so that receivers can
/// detect reorgs and reason about time without fetching the full header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1BlockRef {
    /// The block hash.
    pub hash: B256,
    /// The block number.
    pub number: u64,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The block timestamp.
    pub timestamp: u64,
}

impl L1BlockRef {
    /// Returns the `(hash, number)` identifier of this block.
    pub const fn id(&self) -> BlockId {
        BlockId { hash: self.hash, number: self.number }
    }

    /// Returns true if `child` extends this block.
    pub fn is_parent_of(&self, child: &Self) -> bool {
        child.parent_hash == self.hash && child.number == self.number + 1
    }
}

impl fmt::Display for L1BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A reference to an L2 block, including the L1 epoch it derives from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L2BlockRef {
    /// The block hash.
    pub hash: B256,
    /// The block number.
    pub number: u64,
    /// The parent block hash.
    pub parent_hash: B256,
    /// The block timestamp.
    pub timestamp: u64,
    /// The L1 block this L2 block was derived from.
    #[serde(rename = "l1origin")]
    pub l1_origin: BlockId,
}

impl L2BlockRef {
    /// Returns the `(hash, number)` identifier of this block.
    pub const fn id(&self) -> BlockId {
        BlockId { hash: self.hash, number: self.number }
    }
}

impl fmt::Display for L2BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_block_ref_json_keys_are_stable() {
        let block = L2BlockRef {
            hash: B256::with_last_byte(1),
            number: 10,
            parent_hash: B256::with_last_byte(2),
            timestamp: 1_700_000_000,
            l1_origin: BlockId { hash: B256::with_last_byte(3), number: 42 },
        };

        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("parentHash").is_some());
        assert!(json.get("l1origin").is_some());

        let decoded: L2BlockRef = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, block);
    }

    #[test]
    fn l1_block_ref_parent_check() {
        let parent = L1BlockRef { hash: B256::with_last_byte(1), number: 7, ..Default::default() };
        let child = L1BlockRef {
            hash: B256::with_last_byte(2),
            number: 8,
            parent_hash: B256::with_last_byte(1),
            timestamp: 0,
        };

        assert!(parent.is_parent_of(&child));
        assert!(!child.is_parent_of(&parent));
    }
}
