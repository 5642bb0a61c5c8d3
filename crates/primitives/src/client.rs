use alloy::transports::TransportResult;
use async_trait::async_trait;

use crate::block::{L1BlockRef, L2BlockRef};

/// The view of an L1 RPC endpoint needed to validate a rollup configuration.
#[async_trait]
pub trait L1Client {
    /// Returns the chain id reported by the endpoint.
    async fn chain_id(&self) -> TransportResult<u64>;

    /// Returns the canonical L1 block reference at the given height.
    async fn l1_block_ref_by_number(&self, number: u64) -> TransportResult<L1BlockRef>;
}

/// The view of an L2 RPC endpoint needed to validate a rollup configuration
/// and to serve number-indexed block lookups from the driver.
#[async_trait]
pub trait L2Client {
    /// Returns the chain id reported by the endpoint.
    async fn chain_id(&self) -> TransportResult<u64>;

    /// Returns the canonical L2 block reference at the given height.
    async fn l2_block_ref_by_number(&self, number: u64) -> TransportResult<L2BlockRef>;
}
