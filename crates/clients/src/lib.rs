#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! RPC client connections for the mast rollup node.

/// Execution layer client connection.
pub mod execution;
pub use execution::ExecutionClient;

/// Backup unsafe-sync client, used to backfill gaps in the unsafe L2 chain.
pub mod sync;
pub use sync::BackupSyncClient;
