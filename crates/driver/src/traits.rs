use std::{ops::RangeInclusive, time::Duration};

use async_trait::async_trait;
use mast_primitives::{ExecutionPayload, L1BlockRef, L2BlockRef};
use thiserror::Error;

/// The derivation pipeline consumed by the driver.
///
/// The pipeline turns L1 history and queued unsafe payloads into canonical L2
/// head updates. The driver is its sole caller: all methods are invoked from
/// the event loop only.
#[async_trait]
pub trait DerivationPipeline {
    /// Advances derivation by one unit of work. May perform I/O.
    async fn step(&mut self) -> Result<(), StepError>;

    /// Returns the pipeline to a consistent initial state derived from the
    /// engine's current view. Idempotent.
    fn reset(&mut self);

    /// Enqueues an externally provided unsafe payload for processing. The
    /// unsafe queue is keyed by block number, so ordering between payloads is
    /// best-effort.
    fn add_unsafe_payload(&mut self, payload: ExecutionPayload);

    /// Marks the given L1 block as finalized; the pipeline computes the
    /// implied L2 finalization.
    fn finalize(&mut self, l1_finalized: L1BlockRef);

    /// The L1 block currently being consumed.
    fn origin(&self) -> L1BlockRef;

    /// Whether the execution engine is ready to build new blocks.
    fn engine_ready(&self) -> bool;

    /// The tip of the locally known L2 chain.
    fn unsafe_l2_head(&self) -> L2BlockRef;

    /// The L2 head derived from available L1 data.
    fn safe_l2_head(&self) -> L2BlockRef;

    /// The L2 head implied by L1 finalization.
    fn finalized_l2_head(&self) -> L2BlockRef;

    /// The finalized L1 block the pipeline has processed.
    fn finalized_l1(&self) -> L1BlockRef;

    /// Returns the inclusive range of L2 block numbers missing between the
    /// current unsafe head and `expected_number`. The range is empty when
    /// there is no gap.
    fn unsafe_queue_gap(&self, expected_number: u64) -> RangeInclusive<u64>;
}

/// Classified outcome of a failed derivation step.
///
/// The driver matches on the variant, never on the message, to pick the
/// recovery policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The pipeline has consumed all available L1 data and is idle.
    #[error("derivation pipeline is idle")]
    Eof,
    /// The pipeline needs more L1 data before it can progress. Not counted as
    /// a failure.
    #[error("not enough L1 data to continue derivation")]
    NotEnoughData,
    /// A retryable failure, e.g. a flaky RPC. Unclassified errors from the
    /// pipeline belong here too.
    #[error("temporary derivation error: {0}")]
    Temporary(String),
    /// The pipeline state is inconsistent (e.g. after an L1 reorg) and must
    /// be reset before stepping again.
    #[error("derivation pipeline must be reset: {0}")]
    Reset(String),
    /// An unrecoverable failure. Stops the driver.
    #[error("critical derivation error: {0}")]
    Critical(String),
}

/// The block proposer driven by the event loop.
#[async_trait]
pub trait Proposer {
    /// Returns the delay until the next build attempt. May be zero, and may
    /// change as the head or the clock advances.
    fn plan_next_proposer_action(&self) -> Duration;

    /// The L2 block the proposer will build on next.
    fn building_onto(&self) -> L2BlockRef;

    /// Performs one build action. Returns the newly produced payload, or
    /// `None` when no block was produced this tick.
    async fn run_next_proposer_action(&mut self) -> Result<Option<ExecutionPayload>, ProposerError>;
}

/// A fatal proposer failure.
///
/// Any error surfaced by [`Proposer::run_next_proposer_action`] stops the
/// driver loop. The pipeline is deliberately not reset on the way out, so the
/// crash is not masked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("proposer critical error: {0}")]
pub struct ProposerError(pub String);

/// Best-effort publisher for newly produced payloads.
#[async_trait]
pub trait NetworkPublisher {
    /// Publishes the payload to the gossip network.
    async fn publish_l2_payload(&self, payload: &ExecutionPayload) -> Result<(), PublishError>;
}

/// A failed gossip publish. Logged and metered, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to publish payload: {0}")]
pub struct PublishError(pub String);
