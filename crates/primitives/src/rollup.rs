use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    block::BlockId,
    client::{L1Client, L2Client},
};

/// The genesis state of the rollup chain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    /// The L1 block the rollup starts deriving from.
    pub l1: BlockId,
    /// The L2 genesis block.
    pub l2: BlockId,
    /// Timestamp of the L2 genesis block.
    pub l2_time: u64,
    /// The system configuration in effect at genesis.
    pub system_config: SystemConfig,
}

/// The rollup system configuration recorded on L1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// The account that submits batches to the batch inbox.
    pub batcher_addr: Address,
    /// The L1 fee overhead applied to L2 transactions.
    pub overhead: B256,
    /// The L1 fee scalar applied to L2 transactions.
    pub scalar: B256,
    /// The L2 block gas limit.
    #[serde(rename = "gasLimit")]
    pub gas_limit: u64,
}

/// The rollup chain configuration.
///
/// Persisted as JSON; the key names are part of the node's external interface
/// and must stay stable.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupConfig {
    /// The genesis state of the rollup.
    pub genesis: Genesis,
    /// The L2 block time in seconds.
    pub block_time: u64,
    /// Maximum seconds an L2 block timestamp may run ahead of its L1 origin.
    /// Consumed by the proposer, only validated here.
    pub max_proposer_drift: u64,
    /// Number of L1 blocks in which a proposer window's batches must land.
    /// Consumed by the derivation pipeline, only validated here.
    pub proposer_window_size: u64,
    /// Number of L1 blocks after which a batch channel times out.
    pub channel_timeout: u64,
    /// The L1 chain id.
    #[serde(default)]
    pub l1_chain_id: Option<u64>,
    /// The L2 chain id.
    #[serde(default)]
    pub l2_chain_id: Option<u64>,
    /// The account allowed to sign unsafe payloads gossiped over p2p.
    #[serde(default)]
    pub p2p_proposer_address: Option<Address>,
    /// The L1 address batches are submitted to.
    pub batch_inbox_address: Address,
    /// The account expected to submit batches.
    pub batch_sender_address: Address,
    /// The L1 deposit contract address.
    pub deposit_contract_address: Address,
    /// The L1 address holding the system configuration.
    pub l1_system_config_address: Address,
}

impl RollupConfig {
    /// Validates the configuration, returning the first violation found.
    ///
    /// Each failure mode has its own [`RollupConfigError`] kind so callers can
    /// match on it rather than on message text.
    pub fn check(&self) -> Result<(), RollupConfigError> {
        if self.block_time == 0 {
            return Err(RollupConfigError::BlockTimeZero);
        }
        if self.channel_timeout == 0 {
            return Err(RollupConfigError::MissingChannelTimeout);
        }
        if self.proposer_window_size <= 1 {
            return Err(RollupConfigError::InvalidProposerWindowSize);
        }
        if self.genesis.l1.hash.is_zero() {
            return Err(RollupConfigError::MissingGenesisL1Hash);
        }
        if self.genesis.l2.hash.is_zero() {
            return Err(RollupConfigError::MissingGenesisL2Hash);
        }
        if self.genesis.l1.hash == self.genesis.l2.hash {
            return Err(RollupConfigError::GenesisHashesSame);
        }
        if self.genesis.l2_time == 0 {
            return Err(RollupConfigError::MissingGenesisL2Time);
        }
        if self.genesis.system_config.batcher_addr.is_zero() {
            return Err(RollupConfigError::MissingBatcherAddr);
        }
        if self.genesis.system_config.overhead.is_zero() {
            return Err(RollupConfigError::MissingOverhead);
        }
        if self.genesis.system_config.scalar.is_zero() {
            return Err(RollupConfigError::MissingScalar);
        }
        if self.genesis.system_config.gas_limit == 0 {
            return Err(RollupConfigError::MissingGasLimit);
        }
        if self.batch_inbox_address.is_zero() {
            return Err(RollupConfigError::MissingBatchInboxAddress);
        }
        if self.deposit_contract_address.is_zero() {
            return Err(RollupConfigError::MissingDepositContractAddress);
        }
        let l1_chain_id = self.l1_chain_id.ok_or(RollupConfigError::MissingL1ChainId)?;
        let l2_chain_id = self.l2_chain_id.ok_or(RollupConfigError::MissingL2ChainId)?;
        if l1_chain_id == 0 {
            return Err(RollupConfigError::L1ChainIdNotPositive);
        }
        if l2_chain_id == 0 {
            return Err(RollupConfigError::L2ChainIdNotPositive);
        }
        if l1_chain_id == l2_chain_id {
            return Err(RollupConfigError::ChainIdsSame);
        }
        Ok(())
    }

    /// Checks that the given L1 endpoint serves the configured L1 chain.
    pub async fn check_l1_chain_id(
        &self,
        client: &impl L1Client,
    ) -> Result<(), ChainMismatchError> {
        let expected = self.l1_chain_id.unwrap_or_default();
        let actual = client.chain_id().await?;
        if actual != expected {
            return Err(ChainMismatchError::L1ChainIdMismatch { expected, actual });
        }
        Ok(())
    }

    /// Checks that the given L1 endpoint agrees on the configured L1 genesis block.
    pub async fn check_l1_genesis_block_hash(
        &self,
        client: &impl L1Client,
    ) -> Result<(), ChainMismatchError> {
        let block = client.l1_block_ref_by_number(self.genesis.l1.number).await?;
        if block.hash != self.genesis.l1.hash {
            return Err(ChainMismatchError::L1GenesisHashMismatch {
                expected: self.genesis.l1.hash,
                actual: block.hash,
            });
        }
        Ok(())
    }

    /// Validates the chain id and genesis block hash of an L1 endpoint.
    pub async fn validate_l1_config(
        &self,
        client: &impl L1Client,
    ) -> Result<(), ChainMismatchError> {
        self.check_l1_chain_id(client).await?;
        self.check_l1_genesis_block_hash(client).await?;
        Ok(())
    }

    /// Checks that the given L2 endpoint serves the configured L2 chain.
    pub async fn check_l2_chain_id(
        &self,
        client: &impl L2Client,
    ) -> Result<(), ChainMismatchError> {
        let expected = self.l2_chain_id.unwrap_or_default();
        let actual = client.chain_id().await?;
        if actual != expected {
            return Err(ChainMismatchError::L2ChainIdMismatch { expected, actual });
        }
        Ok(())
    }

    /// Checks that the given L2 endpoint agrees on the configured L2 genesis block.
    pub async fn check_l2_genesis_block_hash(
        &self,
        client: &impl L2Client,
    ) -> Result<(), ChainMismatchError> {
        let block = client.l2_block_ref_by_number(self.genesis.l2.number).await?;
        if block.hash != self.genesis.l2.hash {
            return Err(ChainMismatchError::L2GenesisHashMismatch {
                expected: self.genesis.l2.hash,
                actual: block.hash,
            });
        }
        Ok(())
    }

    /// Validates the chain id and genesis block hash of an L2 endpoint.
    pub async fn validate_l2_config(
        &self,
        client: &impl L2Client,
    ) -> Result<(), ChainMismatchError> {
        self.check_l2_chain_id(client).await?;
        self.check_l2_genesis_block_hash(client).await?;
        Ok(())
    }
}

/// Reasons a [`RollupConfig`] fails static validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RollupConfigError {
    /// The L2 block time is zero.
    #[error("block time cannot be 0")]
    BlockTimeZero,
    /// The channel timeout is zero.
    #[error("channel timeout must be set")]
    MissingChannelTimeout,
    /// The proposer window is too small to ever include a batch.
    #[error("proposer window size must be at least 2")]
    InvalidProposerWindowSize,
    /// The L1 genesis hash is unset.
    #[error("genesis L1 hash cannot be empty")]
    MissingGenesisL1Hash,
    /// The L2 genesis hash is unset.
    #[error("genesis L2 hash cannot be empty")]
    MissingGenesisL2Hash,
    /// L1 and L2 genesis hashes are identical.
    #[error("L1 and L2 genesis block hashes cannot be the same")]
    GenesisHashesSame,
    /// The L2 genesis timestamp is unset.
    #[error("genesis L2 time must be set")]
    MissingGenesisL2Time,
    /// The genesis batcher address is unset.
    #[error("genesis system config must have a batcher address")]
    MissingBatcherAddr,
    /// The genesis fee overhead is unset.
    #[error("genesis system config must have an overhead value")]
    MissingOverhead,
    /// The genesis fee scalar is unset.
    #[error("genesis system config must have a scalar value")]
    MissingScalar,
    /// The genesis gas limit is unset.
    #[error("genesis system config must have a gas limit")]
    MissingGasLimit,
    /// The batch inbox address is unset.
    #[error("batch inbox address cannot be empty")]
    MissingBatchInboxAddress,
    /// The deposit contract address is unset.
    #[error("deposit contract address cannot be empty")]
    MissingDepositContractAddress,
    /// The L1 chain id is unset.
    #[error("L1 chain id must be set")]
    MissingL1ChainId,
    /// The L2 chain id is unset.
    #[error("L2 chain id must be set")]
    MissingL2ChainId,
    /// L1 and L2 chain ids are identical.
    #[error("L1 and L2 chain ids cannot be the same")]
    ChainIdsSame,
    /// The L1 chain id is zero.
    #[error("L1 chain id must be positive")]
    L1ChainIdNotPositive,
    /// The L2 chain id is zero.
    #[error("L2 chain id must be positive")]
    L2ChainIdNotPositive,
}

/// A mismatch between the rollup configuration and a remote RPC endpoint.
#[derive(Debug, Error)]
pub enum ChainMismatchError {
    /// The L1 endpoint reports a different chain id.
    #[error("incorrect L1 RPC chain id {actual}, expected {expected}")]
    L1ChainIdMismatch {
        /// The configured L1 chain id.
        expected: u64,
        /// The chain id reported by the endpoint.
        actual: u64,
    },
    /// The L2 endpoint reports a different chain id.
    #[error("incorrect L2 RPC chain id {actual}, expected {expected}")]
    L2ChainIdMismatch {
        /// The configured L2 chain id.
        expected: u64,
        /// The chain id reported by the endpoint.
        actual: u64,
    },
    /// The L1 endpoint disagrees on the genesis block hash.
    #[error("incorrect L1 genesis block hash {actual}, expected {expected}")]
    L1GenesisHashMismatch {
        /// The configured L1 genesis hash.
        expected: B256,
        /// The hash reported by the endpoint.
        actual: B256,
    },
    /// The L2 endpoint disagrees on the genesis block hash.
    #[error("incorrect L2 genesis block hash {actual}, expected {expected}")]
    L2GenesisHashMismatch {
        /// The configured L2 genesis hash.
        expected: B256,
        /// The hash reported by the endpoint.
        actual: B256,
    },
    /// The endpoint could not be queried.
    #[error(transparent)]
    Transport(#[from] alloy::transports::TransportError),
}
