#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Mast rollup node driver
//!
//! The driver is responsible for:
//! - Deriving the canonical L2 chain from data anchored on L1
//! - Producing new unsafe L2 blocks when configured as a proposer

/// The main driver module with the core event loop.
mod driver;
pub use driver::{Driver, DriverApiError, DriverError, DriverHandle, ProposerAdminError};

/// The driver configuration.
mod config;
pub use config::Config;

/// Interfaces of the collaborators coordinated by the driver.
mod traits;
pub use traits::{
    DerivationPipeline, NetworkPublisher, Proposer, ProposerError, PublishError, StepError,
};

/// Exponential backoff for derivation step re-attempts.
mod backoff;

/// The metrics for the driver.
mod metrics;

/// Deferred JSON encoding for the snapshot log.
mod snapshot;

/// The L1 signal state tracker.
mod state;
