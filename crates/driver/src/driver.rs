use std::{sync::Arc, time::Duration};

use alloy::transports::TransportError;
use alloy_primitives::B256;
use mast_primitives::{
    ExecutionPayload, L1BlockRef, L2BlockRef, L2Client, RollupConfig, SyncStatus,
    time::{current_timestamp_seconds, timestamp_to_block_number},
};
use thiserror::Error;
use tokio::{
    select,
    sync::{mpsc, oneshot},
    time::{Instant, MissedTickBehavior, interval_at, sleep_until},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    backoff::ExponentialBackoff,
    config::Config,
    metrics::DriverMetrics,
    snapshot::LazyJson,
    state::L1State,
    traits::{DerivationPipeline, NetworkPublisher, Proposer, ProposerError, StepError},
};

/// Interval between checks for gaps in the unsafe payload queue.
const GAP_CHECK_INTERVAL: Duration = Duration::from_secs(15);

/// The errors that terminate the driver event loop.
///
/// The embedding node should map these to a non-zero process exit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The derivation pipeline hit an unrecoverable error.
    #[error(transparent)]
    Derivation(StepError),
    /// The proposer hit an unrecoverable error.
    #[error(transparent)]
    Proposer(#[from] ProposerError),
}

/// Rejections of the proposer start/stop admin commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposerAdminError {
    /// This node is not configured to propose blocks.
    #[error("proposer is not enabled")]
    Disabled,
    /// A start was requested while the proposer is running.
    #[error("proposer already running")]
    AlreadyRunning,
    /// A stop was requested while the proposer is stopped.
    #[error("proposer not running")]
    NotRunning,
    /// The caller expected a different unsafe head than the current one.
    #[error("block hash does not match: head {head}, received {received}")]
    HashMismatch {
        /// The current unsafe L2 head hash.
        head: B256,
        /// The hash the caller expected to start on.
        received: B256,
    },
}

/// Errors returned by the public control API on [`DriverHandle`].
#[derive(Debug, Error)]
pub enum DriverApiError {
    /// The event loop exited before the message could be delivered or
    /// answered.
    #[error("driver event loop has stopped")]
    Stopped,
    /// An RPC lookup performed inside the loop failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The proposer admin command was rejected.
    #[error(transparent)]
    ProposerAdmin(#[from] ProposerAdminError),
}

/// A synchronous state query, answered from inside the event loop so the
/// snapshot cannot be torn by a concurrent derivation step.
#[derive(Debug)]
enum StateRequest {
    SyncStatus(oneshot::Sender<SyncStatus>),
    BlockRefWithStatus {
        number: u64,
        tx: oneshot::Sender<(Result<L2BlockRef, TransportError>, SyncStatus)>,
    },
}

#[derive(Debug)]
struct StartProposerRequest {
    hash: B256,
    tx: oneshot::Sender<Result<(), ProposerAdminError>>,
}

type StopProposerRequest = oneshot::Sender<Result<B256, ProposerAdminError>>;

/// Cloneable, thread-safe entry points into the driver event loop.
///
/// All methods hand a message to the loop over a bounded channel and are
/// cancel-safe: dropping the returned future (e.g. through a timeout) before
/// it resolves leaves the loop untouched.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    l1_head_tx: mpsc::Sender<L1BlockRef>,
    l1_safe_tx: mpsc::Sender<L1BlockRef>,
    l1_finalized_tx: mpsc::Sender<L1BlockRef>,
    unsafe_payload_tx: mpsc::Sender<ExecutionPayload>,
    state_tx: mpsc::Sender<StateRequest>,
    force_reset_tx: mpsc::Sender<oneshot::Sender<()>>,
    start_proposer_tx: mpsc::Sender<StartProposerRequest>,
    stop_proposer_tx: mpsc::Sender<StopProposerRequest>,
    proposer_enabled: bool,
}

impl DriverHandle {
    /// Signals that the L1 chain changed its head ("latest") block.
    pub async fn on_l1_head(&self, head: L1BlockRef) -> Result<(), DriverApiError> {
        self.l1_head_tx.send(head).await.map_err(|_| DriverApiError::Stopped)
    }

    /// Signals that the L1 chain changed its safe (justified) block.
    pub async fn on_l1_safe(&self, safe: L1BlockRef) -> Result<(), DriverApiError> {
        self.l1_safe_tx.send(safe).await.map_err(|_| DriverApiError::Stopped)
    }

    /// Signals that the L1 chain changed its finalized block.
    pub async fn on_l1_finalized(&self, finalized: L1BlockRef) -> Result<(), DriverApiError> {
        self.l1_finalized_tx.send(finalized).await.map_err(|_| DriverApiError::Stopped)
    }

    /// Hands an unsafe L2 payload received from the network to the driver.
    pub async fn on_unsafe_l2_payload(
        &self,
        payload: ExecutionPayload,
    ) -> Result<(), DriverApiError> {
        self.unsafe_payload_tx.send(payload).await.map_err(|_| DriverApiError::Stopped)
    }

    /// Returns a sender for the unsafe payload ingress, for wiring external
    /// payload sources such as the backup sync client.
    pub fn unsafe_payload_sender(&self) -> mpsc::Sender<ExecutionPayload> {
        self.unsafe_payload_tx.clone()
    }

    /// Captures a consistent sync status snapshot from the event loop.
    pub async fn sync_status(&self) -> Result<SyncStatus, DriverApiError> {
        let (tx, rx) = oneshot::channel();
        self.state_tx
            .send(StateRequest::SyncStatus(tx))
            .await
            .map_err(|_| DriverApiError::Stopped)?;
        rx.await.map_err(|_| DriverApiError::Stopped)
    }

    /// Captures a sync status snapshot together with the L2 block reference
    /// at `number`, consistent with that same snapshot.
    pub async fn block_ref_with_status(
        &self,
        number: u64,
    ) -> Result<(L2BlockRef, SyncStatus), DriverApiError> {
        let (tx, rx) = oneshot::channel();
        self.state_tx
            .send(StateRequest::BlockRefWithStatus { number, tx })
            .await
            .map_err(|_| DriverApiError::Stopped)?;
        let (block_ref, status) = rx.await.map_err(|_| DriverApiError::Stopped)?;
        Ok((block_ref?, status))
    }

    /// Forces a reset of the derivation pipeline and waits for it to occur.
    pub async fn reset_derivation_pipeline(&self) -> Result<(), DriverApiError> {
        let (tx, rx) = oneshot::channel();
        self.force_reset_tx.send(tx).await.map_err(|_| DriverApiError::Stopped)?;
        rx.await.map_err(|_| DriverApiError::Stopped)
    }

    /// Starts the proposer on top of the given unsafe L2 head hash.
    ///
    /// Rejected when proposing is disabled, already running, or when the
    /// current unsafe head differs from `block_hash` (which would mean
    /// starting on top of an unexpected fork).
    pub async fn start_proposer(&self, block_hash: B256) -> Result<(), DriverApiError> {
        if !self.proposer_enabled {
            return Err(ProposerAdminError::Disabled.into());
        }
        let (tx, rx) = oneshot::channel();
        self.start_proposer_tx
            .send(StartProposerRequest { hash: block_hash, tx })
            .await
            .map_err(|_| DriverApiError::Stopped)?;
        rx.await.map_err(|_| DriverApiError::Stopped)?.map_err(Into::into)
    }

    /// Stops the proposer, returning the last proposed unsafe L2 head hash.
    pub async fn stop_proposer(&self) -> Result<B256, DriverApiError> {
        if !self.proposer_enabled {
            return Err(ProposerAdminError::Disabled.into());
        }
        let (tx, rx) = oneshot::channel();
        self.stop_proposer_tx.send(tx).await.map_err(|_| DriverApiError::Stopped)?;
        rx.await.map_err(|_| DriverApiError::Stopped)?.map_err(Into::into)
    }
}

/// The rollup node driver.
///
/// The driver owns the derivation pipeline, the proposer and all mutable sync
/// state, and serialises access to them on a single event loop: external
/// callers only ever talk to it through the channels behind [`DriverHandle`].
/// This keeps event ordering deterministic without any locking around the
/// pipeline.
#[derive(Debug)]
pub struct Driver<DP, P, N, L2> {
    /// Rollup chain configuration.
    config: Arc<RollupConfig>,
    /// Syncer and proposer settings.
    driver_config: Config,
    /// The derivation pipeline. Reset whenever L1 reorgs; determines the new
    /// safe L2 head.
    derivation: DP,
    /// The block proposer.
    proposer: P,
    /// Gossip publisher for newly produced payloads. Optional.
    network: Option<N>,
    /// Number-indexed L2 lookups for [`DriverHandle::block_ref_with_status`].
    l2: L2,
    /// Latest L1 signal state.
    l1_state: L1State,
    /// Request channel of the backup unsafe-sync client. Optional.
    backup_sync: Option<mpsc::Sender<u64>>,

    /// Backoff strategy for derivation step re-attempts.
    backoff: ExponentialBackoff,
    /// Consecutive failed derivation step attempts.
    step_attempts: u32,
    /// Coalescing step request channel (capacity 1).
    step_tx: mpsc::Sender<()>,
    step_rx: mpsc::Receiver<()>,
    /// Deadline of the scheduled backoff step, if one is pending.
    delayed_step_deadline: Option<Instant>,
    /// Deadline of the next proposer action, if the proposer is armed.
    proposer_deadline: Option<Instant>,

    l1_head_rx: mpsc::Receiver<L1BlockRef>,
    l1_safe_rx: mpsc::Receiver<L1BlockRef>,
    l1_finalized_rx: mpsc::Receiver<L1BlockRef>,
    unsafe_payload_rx: mpsc::Receiver<ExecutionPayload>,
    state_rx: mpsc::Receiver<StateRequest>,
    force_reset_rx: mpsc::Receiver<oneshot::Sender<()>>,
    start_proposer_rx: mpsc::Receiver<StartProposerRequest>,
    stop_proposer_rx: mpsc::Receiver<StopProposerRequest>,

    /// The shutdown token shared with the embedding node.
    cancellation: CancellationToken,
}

impl<DP, P, N, L2> Driver<DP, P, N, L2>
where
    DP: DerivationPipeline + Send,
    P: Proposer + Send,
    N: NetworkPublisher + Send + Sync,
    L2: L2Client + Send + Sync,
{
    /// Creates a new driver and the handle used to talk to it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Arc<RollupConfig>,
        driver_config: Config,
        derivation: DP,
        proposer: P,
        l2: L2,
        network: Option<N>,
        backup_sync: Option<mpsc::Sender<u64>>,
        cancellation: CancellationToken,
    ) -> (DriverHandle, Self) {
        let (l1_head_tx, l1_head_rx) = mpsc::channel(1);
        let (l1_safe_tx, l1_safe_rx) = mpsc::channel(1);
        let (l1_finalized_tx, l1_finalized_rx) = mpsc::channel(1);
        let (unsafe_payload_tx, unsafe_payload_rx) = mpsc::channel(1);
        let (state_tx, state_rx) = mpsc::channel(1);
        let (force_reset_tx, force_reset_rx) = mpsc::channel(1);
        let (start_proposer_tx, start_proposer_rx) = mpsc::channel(1);
        let (stop_proposer_tx, stop_proposer_rx) = mpsc::channel(1);
        let (step_tx, step_rx) = mpsc::channel(1);

        let handle = DriverHandle {
            l1_head_tx,
            l1_safe_tx,
            l1_finalized_tx,
            unsafe_payload_tx,
            state_tx,
            force_reset_tx,
            start_proposer_tx,
            stop_proposer_tx,
            proposer_enabled: driver_config.proposer_enabled,
        };

        let driver = Self {
            config,
            driver_config,
            derivation,
            proposer,
            network,
            l2,
            l1_state: L1State::default(),
            backup_sync,
            backoff: ExponentialBackoff::default(),
            step_attempts: 0,
            step_tx,
            step_rx,
            delayed_step_deadline: None,
            proposer_deadline: None,
            l1_head_rx,
            l1_safe_rx,
            l1_finalized_rx,
            unsafe_payload_rx,
            state_rx,
            force_reset_rx,
            start_proposer_rx,
            stop_proposer_rx,
            cancellation,
        };

        (handle, driver)
    }

    /// Runs the driver event loop until shutdown or a critical error.
    ///
    /// The loop is the sole writer to the derivation pipeline, the proposer
    /// and the L1 signal state. I/O performed by a step, a proposer action or
    /// a state lookup runs inline: no other event is processed while it is in
    /// flight.
    pub async fn start(mut self) -> Result<(), DriverError> {
        info!("Rollup driver event loop started");

        // Start from a clean pipeline state derived from the engine.
        self.derivation.reset();

        // Request an initial step so a node behind the tip starts catching up
        // without waiting for the first L1 signal.
        self.trigger_step();

        let mut gap_check =
            interval_at(Instant::now() + GAP_CHECK_INTERVAL, GAP_CHECK_INTERVAL);
        gap_check.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // While proposing and the L1 state is ready, keep the trigger for
            // the next proposer action up to date with fork-choice changes.
            // Proposing also yields until the engine has finished syncing.
            if self.proposer_eligible() {
                if self.proposer.building_onto().id() != self.derivation.unsafe_l2_head().id() {
                    self.plan_proposer_action();
                }
            } else {
                self.proposer_deadline = None;
            }

            // Disabled branches still evaluate their expression, so the
            // unarmed timers need a placeholder deadline.
            let proposer_sleep = self.proposer_deadline.unwrap_or_else(Instant::now);
            let delayed_sleep = self.delayed_step_deadline.unwrap_or_else(Instant::now);

            select! {
                _ = sleep_until(proposer_sleep), if self.proposer_deadline.is_some() => {
                    self.proposer_deadline = None;
                    self.run_proposer_action().await?;
                }
                _ = gap_check.tick(), if self.backup_sync.is_some() => {
                    self.check_unsafe_queue_gap();
                }
                Some(payload) = self.unsafe_payload_rx.recv() => {
                    self.on_unsafe_payload(payload);
                }
                Some(head) = self.l1_head_rx.recv() => {
                    self.l1_state.handle_new_l1_head_block(head);
                    // A new L1 head may mean a step no longer hits EOF.
                    self.request_step();
                }
                Some(safe) = self.l1_safe_rx.recv() => {
                    // Justified L1 information changes nothing for L2
                    // derivation or status, so no step.
                    self.l1_state.handle_new_l1_safe_block(safe);
                }
                Some(finalized) = self.l1_finalized_rx.recv() => {
                    self.l1_state.handle_new_l1_finalized_block(finalized);
                    self.derivation.finalize(finalized);
                    // More L2 data may be markable as finalized now.
                    self.request_step();
                }
                _ = sleep_until(delayed_sleep), if self.delayed_step_deadline.is_some() => {
                    self.delayed_step_deadline = None;
                    self.trigger_step();
                }
                Some(()) = self.step_rx.recv() => {
                    self.on_step().await?;
                }
                Some(request) = self.state_rx.recv() => {
                    self.on_state_request(request).await;
                }
                Some(ack) = self.force_reset_rx.recv() => {
                    self.on_force_reset(ack);
                }
                Some(request) = self.start_proposer_rx.recv() => {
                    self.on_start_proposer(request);
                }
                Some(reply) = self.stop_proposer_rx.recv() => {
                    self.on_stop_proposer(reply);
                }
                _ = self.cancellation.cancelled() => {
                    info!("Received shutdown signal. Exiting driver event loop");
                    return Ok(());
                }
            }
        }
    }

    /// The proposer may act iff it is enabled, not stopped, an L1 head has
    /// been observed and the engine is ready.
    fn proposer_eligible(&self) -> bool {
        self.driver_config.proposer_enabled
            && !self.driver_config.proposer_stopped
            && self.l1_state.l1_head().is_some()
            && self.derivation.engine_ready()
    }

    /// Re-arms the proposer timer from the proposer's own schedule.
    fn plan_proposer_action(&mut self) {
        let delay = self.proposer.plan_next_proposer_action();
        self.proposer_deadline = Some(Instant::now() + delay);
    }

    /// Runs one proposer build action and publishes its result.
    async fn run_proposer_action(&mut self) -> Result<(), DriverError> {
        match self.proposer.run_next_proposer_action().await {
            Ok(payload) => {
                if let (Some(network), Some(payload)) = (&self.network, payload) {
                    // Publishing unsafe payloads over p2p is optional; a
                    // failure is not severe enough to halt proposing.
                    if let Err(err) = network.publish_l2_payload(&payload).await {
                        warn!(id = %payload.id(), %err, "Failed to publish newly produced payload");
                        DriverMetrics::increment_publishing_errors();
                    }
                }
                // Schedule the next action to keep the proposing loop going.
                self.plan_proposer_action();
                Ok(())
            }
            Err(err) => {
                error!(%err, "Proposer critical error");
                Err(DriverError::Proposer(err))
            }
        }
    }

    /// Executes one derivation step and applies the recovery policy for its
    /// outcome.
    async fn on_step(&mut self) -> Result<(), DriverError> {
        DriverMetrics::set_derivation_idle(false);
        debug!(
            onto_origin = %self.derivation.origin(),
            attempts = self.step_attempts,
            "Derivation process step"
        );

        let result = self.derivation.step().await;
        // Count as an attempt by default; reset on healthy progress.
        self.step_attempts += 1;
        DriverMetrics::set_step_attempts(self.step_attempts);

        match result {
            Ok(()) => {
                self.step_attempts = 0;
                DriverMetrics::set_unsafe_l2_head(self.derivation.unsafe_l2_head().number);
                DriverMetrics::set_safe_l2_head(self.derivation.safe_l2_head().number);
                DriverMetrics::set_finalized_l2_head(self.derivation.finalized_l2_head().number);
                self.request_step();
            }
            Err(StepError::Eof) => {
                debug!(progress = %self.derivation.origin(), "Derivation process went idle");
                self.step_attempts = 0;
                DriverMetrics::set_derivation_idle(true);
            }
            Err(StepError::Reset(err)) => {
                // The pipeline is corrupt, e.g. due to an L1 reorg. Reset it
                // and re-request a step against the fresh state.
                warn!(%err, "Derivation pipeline is reset");
                self.reset_pipeline();
            }
            Err(StepError::NotEnoughData) => {
                // Waiting on more data is not a failure; no backoff.
                self.step_attempts = 0;
                self.request_step();
            }
            Err(StepError::Temporary(err)) => {
                warn!(attempts = self.step_attempts, %err, "Derivation process temporary error");
                self.request_step();
            }
            Err(err @ StepError::Critical(_)) => {
                error!(%err, "Derivation process critical error");
                return Err(DriverError::Derivation(err));
            }
        }

        Ok(())
    }

    /// Resets the derivation pipeline and re-arms stepping.
    fn reset_pipeline(&mut self) {
        self.derivation.reset();
        DriverMetrics::increment_pipeline_resets();
        self.step_attempts = 0;
        self.request_step();
    }

    /// Requests an immediate derivation step. A request already in flight is
    /// enough, so a full channel is not an error.
    fn trigger_step(&self) {
        let _ = self.step_tx.try_send(());
    }

    /// Requests a derivation step, delayed by exponential backoff when the
    /// previous attempts failed. A no-op if a delayed step is already
    /// scheduled.
    fn request_step(&mut self) {
        if self.step_attempts > 0 {
            if self.delayed_step_deadline.is_none() {
                let delay = self.backoff.duration(self.step_attempts);
                debug!(attempts = self.step_attempts, ?delay, "Scheduling step re-attempt with delay");
                self.delayed_step_deadline = Some(Instant::now() + delay);
            } else {
                debug!(
                    attempts = self.step_attempts,
                    "Ignoring step request, re-attempt already scheduled after previous failure"
                );
            }
        } else {
            self.trigger_step();
        }
    }

    /// Queues an unsafe payload received from the network into the pipeline.
    fn on_unsafe_payload(&mut self, payload: ExecutionPayload) {
        self.snapshot("New unsafe payload");
        info!(id = %payload.id(), "Optimistically queueing unsafe L2 execution payload");
        self.derivation.add_unsafe_payload(payload);
        DriverMetrics::increment_unsafe_payloads_received();
        self.request_step();
    }

    /// Answers a synchronous state query.
    async fn on_state_request(&mut self, request: StateRequest) {
        match request {
            StateRequest::SyncStatus(tx) => {
                let _ = tx.send(self.sync_status());
            }
            StateRequest::BlockRefWithStatus { number, tx } => {
                let status = self.sync_status();
                // The lookup runs on the loop task, so the returned reference
                // is consistent with the status snapshot.
                let block_ref = self.l2.l2_block_ref_by_number(number).await;
                let _ = tx.send((block_ref, status));
            }
        }
    }

    /// Resets the pipeline on explicit request and acknowledges the caller.
    fn on_force_reset(&mut self, ack: oneshot::Sender<()>) {
        warn!("Derivation pipeline is manually reset");
        self.reset_pipeline();
        let _ = ack.send(());
    }

    fn on_start_proposer(&mut self, request: StartProposerRequest) {
        let unsafe_head = self.derivation.unsafe_l2_head().hash;
        let result = if !self.driver_config.proposer_stopped {
            Err(ProposerAdminError::AlreadyRunning)
        } else if unsafe_head != request.hash {
            Err(ProposerAdminError::HashMismatch { head: unsafe_head, received: request.hash })
        } else {
            info!("Proposer has been started");
            self.driver_config.proposer_stopped = false;
            // Resume proposing right away.
            self.plan_proposer_action();
            Ok(())
        };
        let _ = request.tx.send(result);
    }

    fn on_stop_proposer(&mut self, reply: StopProposerRequest) {
        let result = if self.driver_config.proposer_stopped {
            Err(ProposerAdminError::NotRunning)
        } else {
            warn!("Proposer has been stopped");
            self.driver_config.proposer_stopped = true;
            Ok(self.derivation.unsafe_l2_head().hash)
        };
        let _ = reply.send(result);
    }

    /// Checks whether the unsafe queue lags behind where wall-clock time says
    /// the L2 chain should be, and asks the backup sync client for the
    /// missing block numbers.
    ///
    /// Enqueueing never blocks: when the request channel fills up, the rest
    /// of the range is dropped and retried on the next tick.
    fn check_unsafe_queue_gap(&self) {
        let Some(backup_sync) = &self.backup_sync else { return };

        let wall_clock = current_timestamp_seconds();
        let expected = timestamp_to_block_number(
            wall_clock,
            self.config.genesis.l2_time,
            self.config.block_time,
        );

        let gap = self.derivation.unsafe_queue_gap(expected);
        if gap.is_empty() {
            return;
        }

        warn!(
            start = gap.start(),
            end = gap.end(),
            "Gap between unsafe queue tip and expected L2 chain detected"
        );
        info!(
            start = gap.start(),
            end = gap.end(),
            "Requesting missing payloads from the backup sync client"
        );

        let mut requested = 0;
        for number in gap {
            if backup_sync.try_send(number).is_err() {
                // Saturated; the remaining numbers come back next tick.
                break;
            }
            requested += 1;
        }
        DriverMetrics::increment_gap_blocks_requested(requested);
    }

    /// Assembles the status snapshot from the pipeline and the L1 signal
    /// state. Only called from the event loop.
    fn sync_status(&self) -> SyncStatus {
        SyncStatus {
            current_l1: self.derivation.origin(),
            current_l1_finalized: self.derivation.finalized_l1(),
            head_l1: self.l1_state.l1_head().unwrap_or_default(),
            safe_l1: self.l1_state.l1_safe().unwrap_or_default(),
            finalized_l1: self.l1_state.l1_finalized().unwrap_or_default(),
            unsafe_l2: self.derivation.unsafe_l2_head(),
            safe_l2: self.derivation.safe_l2_head(),
            finalized_l2: self.derivation.finalized_l2_head(),
        }
    }

    /// Emits a rollup state snapshot event. Fields are encoded lazily so the
    /// cost is only paid when the snapshot sink is enabled.
    fn snapshot(&self, event: &str) {
        let l1_head = self.l1_state.l1_head().unwrap_or_default();
        let l1_current = self.derivation.origin();
        let l2_head = self.derivation.unsafe_l2_head();
        let l2_safe = self.derivation.safe_l2_head();
        let l2_finalized = self.derivation.finalized_l2_head();
        info!(
            target: "snapshot",
            event,
            l1_head = %LazyJson(&l1_head),
            l1_current = %LazyJson(&l1_current),
            l2_head = %LazyJson(&l2_head),
            l2_safe = %LazyJson(&l2_safe),
            l2_finalized = %LazyJson(&l2_finalized),
            "Rollup state snapshot"
        );
    }
}
