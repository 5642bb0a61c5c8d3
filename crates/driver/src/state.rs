use mast_primitives::L1BlockRef;
use tracing::{debug, warn};

use crate::metrics::DriverMetrics;

/// In-memory record of the latest L1 chain signals.
///
/// Not every L1 block has to be signalled: derivation traverses the chain and
/// handles reorgs on its own, the driver only needs the latest references to
/// avoid lagging behind actionable data. Written only from the event loop.
#[derive(Debug, Default)]
pub(crate) struct L1State {
    head: Option<L1BlockRef>,
    safe: Option<L1BlockRef>,
    finalized: Option<L1BlockRef>,
}

impl L1State {
    pub(crate) fn handle_new_l1_head_block(&mut self, head: L1BlockRef) {
        match self.head {
            Some(old) if old.hash == head.hash => {
                debug!(number = head.number, "Received L1 head signal that is the same as the current head");
            }
            Some(old) if old.is_parent_of(&head) => {
                debug!(number = head.number, hash = %head.hash, "L1 head advanced");
            }
            Some(old) => {
                warn!(
                    old = %old.id(),
                    new = %head.id(),
                    "L1 head signal indicates an L1 reorg"
                );
                DriverMetrics::increment_l1_reorgs(old.number, head.number);
            }
            None => {
                debug!(number = head.number, hash = %head.hash, "Received first L1 head signal");
            }
        }

        self.head = Some(head);
        DriverMetrics::set_l1_head(head.number);
    }

    pub(crate) fn handle_new_l1_safe_block(&mut self, safe: L1BlockRef) {
        debug!(number = safe.number, hash = %safe.hash, "New L1 safe block");
        self.safe = Some(safe);
        DriverMetrics::set_l1_safe(safe.number);
    }

    pub(crate) fn handle_new_l1_finalized_block(&mut self, finalized: L1BlockRef) {
        debug!(number = finalized.number, hash = %finalized.hash, "New L1 finalized block");
        self.finalized = Some(finalized);
        DriverMetrics::set_l1_finalized(finalized.number);
    }

    pub(crate) const fn l1_head(&self) -> Option<L1BlockRef> {
        self.head
    }

    pub(crate) const fn l1_safe(&self) -> Option<L1BlockRef> {
        self.safe
    }

    pub(crate) const fn l1_finalized(&self) -> Option<L1BlockRef> {
        self.finalized
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;

    use super::*;

    fn block(number: u64, hash: u8, parent: u8) -> L1BlockRef {
        L1BlockRef {
            hash: B256::with_last_byte(hash),
            number,
            parent_hash: B256::with_last_byte(parent),
            timestamp: number * 12,
        }
    }

    #[test]
    fn tracks_latest_signals_independently() {
        let mut state = L1State::default();
        assert!(state.l1_head().is_none());

        let head = block(10, 0x0a, 0x09);
        let safe = block(8, 0x08, 0x07);
        let finalized = block(5, 0x05, 0x04);

        state.handle_new_l1_head_block(head);
        state.handle_new_l1_safe_block(safe);
        state.handle_new_l1_finalized_block(finalized);

        assert_eq!(state.l1_head(), Some(head));
        assert_eq!(state.l1_safe(), Some(safe));
        assert_eq!(state.l1_finalized(), Some(finalized));
    }

    #[test]
    fn head_signal_replaces_previous_head_on_reorg() {
        let mut state = L1State::default();

        state.handle_new_l1_head_block(block(10, 0x0a, 0x09));
        // A sibling at the same height replaces the tracked head.
        let reorged = block(10, 0x1a, 0x09);
        state.handle_new_l1_head_block(reorged);

        assert_eq!(state.l1_head(), Some(reorged));
    }
}
