use std::time::{SystemTime, UNIX_EPOCH};

/// A UNIX timestamp in seconds.
pub type Timestamp = u64;

/// Get the current UNIX timestamp in seconds.
pub fn current_timestamp_seconds() -> Timestamp {
    SystemTime::now().duration_since(UNIX_EPOCH).expect("Time went backwards").as_secs()
}

/// Helper function to compute the block number a chain is expected to have
/// reached at `timestamp`, given its genesis timestamp and block time.
pub const fn timestamp_to_block_number(
    timestamp: Timestamp,
    genesis_timestamp: Timestamp,
    block_time: u64,
) -> u64 {
    timestamp.saturating_sub(genesis_timestamp) / block_time
}
