//! Scripted mock collaborators for driving the event loop in tests.

use std::{
    collections::{HashMap, VecDeque},
    ops::RangeInclusive,
    sync::{Arc, Mutex},
    time::Duration,
};

use alloy::transports::{TransportErrorKind, TransportResult};
use alloy_primitives::{B256, U256};
use async_trait::async_trait;
use mast_driver::{
    Config, DerivationPipeline, Driver, DriverError, DriverHandle, NetworkPublisher, Proposer,
    ProposerError, PublishError, StepError,
};
use mast_primitives::{
    BlockId, ExecutionPayload, Genesis, L1BlockRef, L2BlockRef, L2Client, RollupConfig,
    SystemConfig, time::current_timestamp_seconds,
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::Instant,
};
use tokio_util::sync::CancellationToken;

/// Everything the mocks observed, in the order the driver did it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Step { at: Instant, result: Result<(), StepError> },
    Reset,
    PayloadAdded(BlockId),
    Finalized(u64),
    GapQueried(u64),
    ProposerRan { at: Instant },
    Published(BlockId),
    PublishFailed(BlockId),
}

/// Mutable state shared between a test and its mock pipeline.
#[derive(Debug)]
pub struct PipelineState {
    /// Scripted step outcomes. When exhausted, steps return [`StepError::Eof`].
    pub script: VecDeque<Result<(), StepError>>,
    pub origin: L1BlockRef,
    pub finalized_l1: L1BlockRef,
    pub unsafe_head: L2BlockRef,
    pub safe_head: L2BlockRef,
    pub finalized_head: L2BlockRef,
    pub engine_ready: bool,
    /// The gap reported to the driver on every queue-gap query.
    pub gap: Option<RangeInclusive<u64>>,
}

/// A scripted derivation pipeline.
#[derive(Debug)]
pub struct TestPipeline {
    state: Arc<Mutex<PipelineState>>,
    events: mpsc::UnboundedSender<Event>,
}

#[async_trait]
impl DerivationPipeline for TestPipeline {
    async fn step(&mut self) -> Result<(), StepError> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.script.pop_front().unwrap_or(Err(StepError::Eof))
        };
        let _ = self.events.send(Event::Step { at: Instant::now(), result: result.clone() });
        result
    }

    fn reset(&mut self) {
        let _ = self.events.send(Event::Reset);
    }

    fn add_unsafe_payload(&mut self, payload: ExecutionPayload) {
        let _ = self.events.send(Event::PayloadAdded(payload.id()));
    }

    fn finalize(&mut self, l1_finalized: L1BlockRef) {
        let _ = self.events.send(Event::Finalized(l1_finalized.number));
    }

    fn origin(&self) -> L1BlockRef {
        self.state.lock().unwrap().origin
    }

    fn engine_ready(&self) -> bool {
        self.state.lock().unwrap().engine_ready
    }

    fn unsafe_l2_head(&self) -> L2BlockRef {
        self.state.lock().unwrap().unsafe_head
    }

    fn safe_l2_head(&self) -> L2BlockRef {
        self.state.lock().unwrap().safe_head
    }

    fn finalized_l2_head(&self) -> L2BlockRef {
        self.state.lock().unwrap().finalized_head
    }

    fn finalized_l1(&self) -> L1BlockRef {
        self.state.lock().unwrap().finalized_l1
    }

    fn unsafe_queue_gap(&self, expected_number: u64) -> RangeInclusive<u64> {
        let _ = self.events.send(Event::GapQueried(expected_number));
        let gap = self.state.lock().unwrap().gap.clone();
        // An inverted range (end below start) reads as "no gap".
        gap.unwrap_or(RangeInclusive::new(1, 0))
    }
}

/// Mutable state shared between a test and its mock proposer.
#[derive(Debug)]
pub struct ProposerState {
    /// Delay returned by every plan call.
    pub delay: Duration,
    /// The parent the proposer claims to build on.
    pub building_onto: L2BlockRef,
    /// Scripted build outcomes. When exhausted, actions return `Ok(None)`.
    pub actions: VecDeque<Result<Option<ExecutionPayload>, ProposerError>>,
}

/// A scripted proposer.
#[derive(Debug)]
pub struct TestProposer {
    state: Arc<Mutex<ProposerState>>,
    events: mpsc::UnboundedSender<Event>,
}

#[async_trait]
impl Proposer for TestProposer {
    fn plan_next_proposer_action(&self) -> Duration {
        self.state.lock().unwrap().delay
    }

    fn building_onto(&self) -> L2BlockRef {
        self.state.lock().unwrap().building_onto
    }

    async fn run_next_proposer_action(&mut self) -> Result<Option<ExecutionPayload>, ProposerError> {
        let _ = self.events.send(Event::ProposerRan { at: Instant::now() });
        let mut state = self.state.lock().unwrap();
        state.actions.pop_front().unwrap_or(Ok(None))
    }
}

/// A publisher that records publishes and can be made to fail.
#[derive(Debug)]
pub struct TestNetwork {
    fail: Arc<Mutex<bool>>,
    events: mpsc::UnboundedSender<Event>,
}

#[async_trait]
impl NetworkPublisher for TestNetwork {
    async fn publish_l2_payload(&self, payload: &ExecutionPayload) -> Result<(), PublishError> {
        if *self.fail.lock().unwrap() {
            let _ = self.events.send(Event::PublishFailed(payload.id()));
            return Err(PublishError("gossip topic unavailable".to_string()));
        }
        let _ = self.events.send(Event::Published(payload.id()));
        Ok(())
    }
}

/// A number-indexed L2 lookup backed by a map.
#[derive(Debug, Clone, Default)]
pub struct TestL2Chain {
    pub blocks: Arc<Mutex<HashMap<u64, L2BlockRef>>>,
}

#[async_trait]
impl L2Client for TestL2Chain {
    async fn chain_id(&self) -> TransportResult<u64> {
        Ok(901)
    }

    async fn l2_block_ref_by_number(&self, number: u64) -> TransportResult<L2BlockRef> {
        self.blocks
            .lock()
            .unwrap()
            .get(&number)
            .copied()
            .ok_or_else(|| TransportErrorKind::custom_str(&format!("block {number} not found")))
    }
}

/// A running driver with handles on all of its mock collaborators.
#[derive(Debug)]
pub struct TestDriver {
    pub handle: DriverHandle,
    pub pipeline: Arc<Mutex<PipelineState>>,
    pub proposer: Arc<Mutex<ProposerState>>,
    pub publish_fail: Arc<Mutex<bool>>,
    pub l2_chain: TestL2Chain,
    pub events: mpsc::UnboundedReceiver<Event>,
    pub backup_rx: Option<mpsc::Receiver<u64>>,
    pub cancellation: CancellationToken,
    pub task: JoinHandle<Result<(), DriverError>>,
}

impl TestDriver {
    /// Awaits the next mock event.
    pub async fn next_event(&mut self) -> Event {
        self.events.recv().await.expect("event stream closed")
    }

    /// Awaits the next step event, skipping anything else.
    pub async fn next_step(&mut self) -> (Instant, Result<(), StepError>) {
        loop {
            if let Event::Step { at, result } = self.next_event().await {
                return (at, result);
            }
        }
    }

    /// Returns true if no event arrives within the given (paused) window.
    pub async fn quiet_for(&mut self, window: Duration) -> bool {
        tokio::time::timeout(window, self.events.recv()).await.is_err()
    }
}

pub struct TestDriverBuilder {
    pub rollup_config: RollupConfig,
    pub driver_config: Config,
    pub script: Vec<Result<(), StepError>>,
    pub proposer_actions: Vec<Result<Option<ExecutionPayload>, ProposerError>>,
    pub proposer_delay: Duration,
    pub engine_ready: bool,
    pub gap: Option<RangeInclusive<u64>>,
    pub backup_capacity: Option<usize>,
    pub unsafe_head: L2BlockRef,
}

impl TestDriverBuilder {
    pub fn new() -> Self {
        Self {
            rollup_config: test_rollup_config(),
            driver_config: Config::default(),
            script: vec![],
            proposer_actions: vec![],
            proposer_delay: Duration::from_secs(2),
            engine_ready: true,
            gap: None,
            backup_capacity: None,
            unsafe_head: genesis_l2_ref(),
        }
    }

    pub fn with_script(mut self, script: Vec<Result<(), StepError>>) -> Self {
        self.script = script;
        self
    }

    pub fn with_proposer_enabled(mut self, stopped: bool) -> Self {
        self.driver_config.proposer_enabled = true;
        self.driver_config.proposer_stopped = stopped;
        self
    }

    pub fn with_proposer_actions(
        mut self,
        actions: Vec<Result<Option<ExecutionPayload>, ProposerError>>,
    ) -> Self {
        self.proposer_actions = actions;
        self
    }

    pub fn with_gap(mut self, gap: RangeInclusive<u64>, backup_capacity: usize) -> Self {
        self.gap = Some(gap);
        self.backup_capacity = Some(backup_capacity);
        self
    }

    pub fn with_l2_genesis_time(mut self, l2_time: u64) -> Self {
        self.rollup_config.genesis.l2_time = l2_time;
        self
    }

    pub fn with_unsafe_head(mut self, unsafe_head: L2BlockRef) -> Self {
        self.unsafe_head = unsafe_head;
        self
    }

    pub fn build(self) -> TestDriver {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let pipeline_state = Arc::new(Mutex::new(PipelineState {
            script: self.script.into(),
            origin: l1_block(0),
            finalized_l1: l1_block(0),
            unsafe_head: self.unsafe_head,
            safe_head: genesis_l2_ref(),
            finalized_head: genesis_l2_ref(),
            engine_ready: self.engine_ready,
            gap: self.gap,
        }));
        let pipeline = TestPipeline { state: pipeline_state.clone(), events: event_tx.clone() };

        let proposer_state = Arc::new(Mutex::new(ProposerState {
            delay: self.proposer_delay,
            building_onto: L2BlockRef::default(),
            actions: self.proposer_actions.into(),
        }));
        let proposer = TestProposer { state: proposer_state.clone(), events: event_tx.clone() };

        let publish_fail = Arc::new(Mutex::new(false));
        let network = TestNetwork { fail: publish_fail.clone(), events: event_tx };

        let l2_chain = TestL2Chain::default();

        let (backup_tx, backup_rx) = match self.backup_capacity {
            Some(capacity) => {
                let (tx, rx) = mpsc::channel(capacity);
                (Some(tx), Some(rx))
            }
            None => (None, None),
        };

        let cancellation = CancellationToken::new();
        let (handle, driver) = Driver::new(
            Arc::new(self.rollup_config),
            self.driver_config,
            pipeline,
            proposer,
            l2_chain.clone(),
            Some(network),
            backup_tx,
            cancellation.clone(),
        );

        let task = tokio::spawn(driver.start());

        TestDriver {
            handle,
            pipeline: pipeline_state,
            proposer: proposer_state,
            publish_fail,
            l2_chain,
            events: event_rx,
            backup_rx,
            cancellation,
            task,
        }
    }
}

/// A valid rollup config for tests: 2-second blocks, distinct chain ids.
pub fn test_rollup_config() -> RollupConfig {
    RollupConfig {
        genesis: Genesis {
            l1: BlockId { hash: B256::with_last_byte(0xaa), number: 424_242 },
            l2: BlockId { hash: B256::with_last_byte(0xbb), number: 0 },
            l2_time: current_timestamp_seconds(),
            system_config: SystemConfig {
                batcher_addr: alloy_primitives::Address::with_last_byte(0x01),
                overhead: B256::with_last_byte(0x02),
                scalar: B256::with_last_byte(0x03),
                gas_limit: 30_000_000,
            },
        },
        block_time: 2,
        max_proposer_drift: 600,
        proposer_window_size: 3600,
        channel_timeout: 300,
        l1_chain_id: Some(900),
        l2_chain_id: Some(901),
        p2p_proposer_address: None,
        batch_inbox_address: alloy_primitives::Address::with_last_byte(0x05),
        batch_sender_address: alloy_primitives::Address::with_last_byte(0x06),
        deposit_contract_address: alloy_primitives::Address::with_last_byte(0x07),
        l1_system_config_address: alloy_primitives::Address::with_last_byte(0x08),
    }
}

/// The L2 block reference of the test genesis.
pub fn genesis_l2_ref() -> L2BlockRef {
    L2BlockRef {
        hash: B256::with_last_byte(0xbb),
        number: 0,
        parent_hash: B256::ZERO,
        timestamp: 0,
        l1_origin: BlockId { hash: B256::with_last_byte(0xaa), number: 424_242 },
    }
}

/// An L1 block reference at the given height with a deterministic hash.
pub fn l1_block(number: u64) -> L1BlockRef {
    L1BlockRef {
        hash: B256::with_last_byte(number as u8 + 1),
        number,
        parent_hash: B256::with_last_byte(number as u8),
        timestamp: number * 12,
    }
}

/// An L2 block reference at the given height with a deterministic hash.
pub fn l2_block(number: u64) -> L2BlockRef {
    L2BlockRef {
        hash: B256::repeat_byte(number as u8),
        number,
        parent_hash: B256::repeat_byte(number.saturating_sub(1) as u8),
        timestamp: number * 2,
        l1_origin: BlockId { hash: B256::with_last_byte(0xaa), number: 424_242 },
    }
}

/// An execution payload for the given L2 height.
pub fn payload(number: u64) -> ExecutionPayload {
    ExecutionPayload {
        parent_hash: B256::repeat_byte(number.saturating_sub(1) as u8),
        fee_recipient: alloy_primitives::Address::with_last_byte(0x10),
        prev_randao: B256::ZERO,
        block_number: number,
        gas_limit: 30_000_000,
        gas_used: 0,
        timestamp: number * 2,
        base_fee_per_gas: U256::from(7),
        block_hash: B256::repeat_byte(number as u8),
        transactions: vec![],
    }
}
