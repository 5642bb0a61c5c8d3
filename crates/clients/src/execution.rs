use alloy::{
    eips::eip2718::Encodable2718,
    rpc::{
        client::{ClientBuilder, RpcClient},
        types::{Block, BlockNumberOrTag, Header},
    },
    transports::{TransportErrorKind, TransportResult},
};
use alloy_primitives::{B256, U64, U256};
use async_trait::async_trait;
use mast_primitives::{BlockId, ExecutionPayload, L1BlockRef, L1Client, L2BlockRef, L2Client};
use serde::{Deserialize, Serialize};
use url::Url;

/// An HTTP JSON-RPC execution client.
///
/// A thin wrapper over an [`RpcClient`] with the lookups the node needs on
/// both chains, plus the rollup-specific queries served by a rollup-aware L2
/// execution client.
#[derive(Clone, Debug)]
pub struct ExecutionClient {
    /// The underlying RPC client, used for standard and rollup-specific
    /// requests alike.
    rpc: RpcClient,
}

/// The L1 origin record a rollup-aware execution client keeps per L2 block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1Origin {
    /// The L2 block number this record belongs to.
    #[serde(rename = "blockID")]
    pub block_id: U64,
    /// The hash of the L2 block.
    pub l2_block_hash: B256,
    /// The height of the L1 block this L2 block derives from.
    pub l1_block_height: U64,
    /// The hash of the L1 block this L2 block derives from.
    pub l1_block_hash: B256,
}

impl ExecutionClient {
    /// Create a new [`ExecutionClient`] for the given HTTP URL.
    pub fn new(http_url: Url) -> Self {
        let rpc = ClientBuilder::default().http(http_url);

        Self { rpc }
    }

    /// Get the chain id reported by the endpoint.
    pub async fn get_chain_id(&self) -> TransportResult<u64> {
        let result: U64 = self.rpc.request("eth_chainId", ()).await?;

        Ok(result.to())
    }

    /// Get the header of the block with the given number. If `None`, the
    /// latest block is returned.
    pub async fn get_header(&self, block_number: Option<u64>) -> TransportResult<Header> {
        let tag = block_number.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number);

        let header: Option<Header> = self.rpc.request("eth_getHeaderByNumber", vec![tag]).await?;
        header.ok_or_else(|| TransportErrorKind::custom_str(&format!("Header not found: {tag}")))
    }

    /// Get the block with the given number, including full transactions.
    pub async fn get_block(&self, block_number: u64) -> TransportResult<Option<Block>> {
        self.rpc.request("eth_getBlockByNumber", (BlockNumberOrTag::Number(block_number), true)).await
    }

    /// ROLLUP-SPECIFIC: returns the L1 origin of the L2 block with the given
    /// number, as recorded by a rollup-aware execution client.
    pub async fn l1_origin_by_number(&self, block_number: u64) -> TransportResult<L1Origin> {
        self.rpc.request("rollup_l1OriginByNumber", (U64::from(block_number),)).await
    }

    /// Fetch the L2 block with the given number as an [`ExecutionPayload`],
    /// ready to be fed into the unsafe payload queue.
    pub async fn payload_by_number(
        &self,
        block_number: u64,
    ) -> TransportResult<Option<ExecutionPayload>> {
        let Some(block) = self.get_block(block_number).await? else {
            return Ok(None);
        };

        let header = block.header;
        let transactions = block
            .transactions
            .into_transactions()
            .map(|tx| tx.inner.inner().encoded_2718().into())
            .collect();

        Ok(Some(ExecutionPayload {
            parent_hash: header.parent_hash,
            fee_recipient: header.beneficiary,
            prev_randao: header.mix_hash,
            block_number: header.number,
            gas_limit: header.gas_limit,
            gas_used: header.gas_used,
            timestamp: header.timestamp,
            base_fee_per_gas: U256::from(header.base_fee_per_gas.unwrap_or_default()),
            block_hash: header.hash,
            transactions,
        }))
    }
}

#[async_trait]
impl L1Client for ExecutionClient {
    async fn chain_id(&self) -> TransportResult<u64> {
        self.get_chain_id().await
    }

    async fn l1_block_ref_by_number(&self, number: u64) -> TransportResult<L1BlockRef> {
        let header = self.get_header(Some(number)).await?;

        Ok(L1BlockRef {
            hash: header.hash,
            number: header.number,
            parent_hash: header.parent_hash,
            timestamp: header.timestamp,
        })
    }
}

#[async_trait]
impl L2Client for ExecutionClient {
    async fn chain_id(&self) -> TransportResult<u64> {
        self.get_chain_id().await
    }

    async fn l2_block_ref_by_number(&self, number: u64) -> TransportResult<L2BlockRef> {
        let header = self.get_header(Some(number)).await?;
        let origin = self.l1_origin_by_number(number).await?;

        Ok(L2BlockRef {
            hash: header.hash,
            number: header.number,
            parent_hash: header.parent_hash,
            timestamp: header.timestamp,
            l1_origin: BlockId { hash: origin.l1_block_hash, number: origin.l1_block_height.to() },
        })
    }
}
