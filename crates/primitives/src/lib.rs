#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Mast rollup node primitive types, utilities and constants.

/// L1 and L2 block reference types.
pub mod block;
pub use block::{BlockId, L1BlockRef, L2BlockRef};

/// Minimal chain client traits consumed by config validation and the driver.
pub mod client;
pub use client::{L1Client, L2Client};

/// The L2 execution payload type.
pub mod payload;
pub use payload::ExecutionPayload;

/// The rollup chain configuration.
pub mod rollup;
pub use rollup::{ChainMismatchError, Genesis, RollupConfig, RollupConfigError, SystemConfig};

/// Node sync status types.
pub mod sync;
pub use sync::SyncStatus;

/// Time-related utilities.
pub mod time;
