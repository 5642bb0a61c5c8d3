use serde::{Deserialize, Serialize};

use crate::block::{L1BlockRef, L2BlockRef};

/// A snapshot of the node's position on both chains.
///
/// Snapshots are taken inside the driver event loop, so all fields are
/// consistent with each other: no derivation step runs between reading the
/// pipeline heads and the L1 signal state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    /// The L1 block the derivation pipeline is currently consuming.
    pub current_l1: L1BlockRef,
    /// The finalized L1 block the derivation pipeline has seen.
    pub current_l1_finalized: L1BlockRef,
    /// The latest L1 head signalled to the node.
    pub head_l1: L1BlockRef,
    /// The latest safe L1 block signalled to the node.
    pub safe_l1: L1BlockRef,
    /// The latest finalized L1 block signalled to the node.
    pub finalized_l1: L1BlockRef,
    /// The tip of the locally known L2 chain. May be reorged.
    pub unsafe_l2: L2BlockRef,
    /// The L2 head derived from L1 data seen by the node.
    pub safe_l2: L2BlockRef,
    /// The L2 head implied by L1 finalization.
    pub finalized_l2: L2BlockRef,
}
