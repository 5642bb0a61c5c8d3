use mast_primitives::ExecutionPayload;
use tokio::{select, sync::mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::execution::ExecutionClient;

/// Capacity of the block number request channel. The driver enqueues with
/// non-blocking sends and retries dropped numbers on its next gap check, so
/// a modest buffer is enough.
const REQUEST_CHANNEL_CAPACITY: usize = 128;

/// Backup client that fills gaps in the unsafe L2 chain.
///
/// The driver pushes missing block numbers onto a bounded request channel;
/// this worker fetches each block from a trusted backup RPC and feeds it back
/// into the driver's unsafe payload ingress. Individual fetches are not
/// guaranteed to succeed: failures only produce warnings, and the driver
/// re-requests still-missing numbers on a later gap check.
#[derive(Debug)]
pub struct BackupSyncClient {
    /// The backup RPC connection.
    el: ExecutionClient,
    /// Missing block numbers requested by the driver.
    request_rx: mpsc::Receiver<u64>,
    /// The driver's unsafe payload ingress.
    payload_tx: mpsc::Sender<ExecutionPayload>,
}

impl BackupSyncClient {
    /// Creates a new backup sync client. Returns the request sender handed to
    /// the driver alongside the worker itself.
    pub fn new(
        el: ExecutionClient,
        payload_tx: mpsc::Sender<ExecutionPayload>,
    ) -> (mpsc::Sender<u64>, Self) {
        let (request_tx, request_rx) = mpsc::channel(REQUEST_CHANNEL_CAPACITY);

        (request_tx, Self { el, request_rx, payload_tx })
    }

    /// Runs the fetch loop until shutdown.
    pub async fn start(mut self, cancellation: CancellationToken) {
        loop {
            select! {
                _ = cancellation.cancelled() => {
                    info!("Received shutdown signal. Exiting backup sync task");
                    return;
                }
                request = self.request_rx.recv() => {
                    let Some(number) = request else {
                        // All request senders are gone; nothing left to serve.
                        return;
                    };
                    self.fetch_and_forward(number).await;
                }
            }
        }
    }

    /// Fetches a single block and forwards it as an unsafe payload.
    async fn fetch_and_forward(&self, number: u64) {
        match self.el.payload_by_number(number).await {
            Ok(Some(payload)) => {
                debug!(number, id = %payload.id(), "Fetched unsafe block from backup RPC");
                if self.payload_tx.send(payload).await.is_err() {
                    warn!("Driver unsafe payload channel closed, dropping fetched block");
                }
            }
            Ok(None) => {
                warn!(number, "Backup RPC does not have the requested block yet");
            }
            Err(err) => {
                warn!(number, ?err, "Failed to fetch unsafe block from backup RPC");
            }
        }
    }
}
