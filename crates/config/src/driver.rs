use clap::Parser;

/// Driver-related configuration options
#[derive(Debug, Clone, Parser)]
pub struct DriverOpts {
    /// Number of L1 confirmations to wait for before deriving from an L1 block
    #[clap(long = "driver.syncer-conf-depth", env = "MAST_SYNCER_CONF_DEPTH", default_value_t = 0)]
    pub syncer_conf_depth: u64,
    /// Number of L1 confirmations the proposer waits for before picking an L1 origin
    #[clap(
        long = "driver.proposer-conf-depth",
        env = "MAST_PROPOSER_CONF_DEPTH",
        default_value_t = 0
    )]
    pub proposer_conf_depth: u64,
    /// Enable block production on this node
    #[clap(long = "driver.proposer-enabled", env = "MAST_PROPOSER_ENABLED", default_value_t = false)]
    pub proposer_enabled: bool,
    /// Start with block production paused, to be resumed over the admin API
    #[clap(long = "driver.proposer-stopped", env = "MAST_PROPOSER_STOPPED", default_value_t = false)]
    pub proposer_stopped: bool,
}

impl DriverOpts {
    /// Builds the driver configuration from these options.
    pub const fn as_driver_config(&self) -> mast_driver::Config {
        mast_driver::Config {
            syncer_conf_depth: self.syncer_conf_depth,
            proposer_conf_depth: self.proposer_conf_depth,
            proposer_enabled: self.proposer_enabled,
            proposer_stopped: self.proposer_stopped,
        }
    }
}
