use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::block::BlockId;

/// An L2 execution payload, either produced locally by the proposer or
/// received from the gossip network / backup sync.
///
/// The driver treats the body as opaque: only the block identity matters to
/// it. The full field set is kept so payloads can be forwarded to the engine
/// without a refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayload {
    /// The parent block hash.
    pub parent_hash: B256,
    /// The fee recipient of the block.
    pub fee_recipient: Address,
    /// The randomness beacon value of the block.
    pub prev_randao: B256,
    /// The block number.
    pub block_number: u64,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The gas used by the block.
    pub gas_used: u64,
    /// The block timestamp.
    pub timestamp: u64,
    /// The base fee per gas of the block.
    pub base_fee_per_gas: U256,
    /// The block hash.
    pub block_hash: B256,
    /// The opaque, encoded transactions of the block.
    pub transactions: Vec<Bytes>,
}

impl ExecutionPayload {
    /// Returns the `(hash, number)` identifier of the block this payload carries.
    pub const fn id(&self) -> BlockId {
        BlockId { hash: self.block_hash, number: self.block_number }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_id_matches_block_fields() {
        let payload = ExecutionPayload {
            parent_hash: B256::with_last_byte(1),
            fee_recipient: Address::with_last_byte(2),
            prev_randao: B256::ZERO,
            block_number: 99,
            gas_limit: 30_000_000,
            gas_used: 21_000,
            timestamp: 1_700_000_000,
            base_fee_per_gas: U256::from(7),
            block_hash: B256::with_last_byte(3),
            transactions: vec![Bytes::from_static(&[0xde, 0xad])],
        };

        assert_eq!(payload.id(), BlockId { hash: B256::with_last_byte(3), number: 99 });
    }
}
