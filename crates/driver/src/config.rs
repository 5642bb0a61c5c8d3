/// Syncer and proposer settings for the driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Number of L1 confirmations the syncing derivation waits for before
    /// consuming an L1 block. Consumed by the L1 source, carried here.
    pub syncer_conf_depth: u64,
    /// Number of L1 confirmations the proposer waits for before picking an
    /// L1 origin. Consumed by the proposer, carried here.
    pub proposer_conf_depth: u64,
    /// Whether this node may produce blocks at all. Immutable at runtime.
    pub proposer_enabled: bool,
    /// Whether block production is currently paused. After startup only the
    /// driver event loop writes this.
    pub proposer_stopped: bool,
}
