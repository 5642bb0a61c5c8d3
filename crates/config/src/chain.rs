use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Parser;
use mast_primitives::RollupConfig;
use thiserror::Error;
use url::Url;

/// L1-related configuration options
#[derive(Debug, Clone, Parser)]
pub struct L1Opts {
    /// The URL of the L1 execution client HTTP connection
    #[clap(long = "l1.el-url", env = "MAST_L1_EXECUTION_URL", id = "l1-el-url")]
    pub el_url: Url,
}

/// L2-related configuration options
#[derive(Debug, Clone, Parser)]
pub struct L2Opts {
    /// The URL of the L2 execution client HTTP connection
    #[clap(long = "l2.el-url", env = "MAST_L2_EXECUTION_URL", id = "l2-el-url")]
    pub el_url: Url,
    /// The URL of a trusted RPC used to backfill missing unsafe blocks.
    /// Backup sync is disabled when unset.
    #[clap(long = "l2.backup-sync-url", env = "MAST_L2_BACKUP_SYNC_URL")]
    pub backup_sync_url: Option<Url>,
}

/// Rollup chain configuration options
#[derive(Debug, Clone, Parser)]
pub struct RollupOpts {
    /// Path to the rollup chain configuration JSON file
    #[clap(long = "rollup.config", env = "MAST_ROLLUP_CONFIG")]
    pub config_path: PathBuf,
}

impl RollupOpts {
    /// Reads the rollup configuration from the configured path.
    ///
    /// The returned configuration has not been validated; callers must run
    /// [`RollupConfig::check`] before starting the node.
    pub fn load(&self) -> Result<RollupConfig, RollupConfigLoadError> {
        let file = File::open(&self.config_path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;

        Ok(config)
    }
}

/// An error that occurs while reading the rollup configuration file.
#[derive(Debug, Error)]
pub enum RollupConfigLoadError {
    /// The file could not be opened or read.
    #[error("failed to read rollup config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid rollup config JSON.
    #[error("failed to decode rollup config: {0}")]
    Decode(#[from] serde_json::Error),
}
