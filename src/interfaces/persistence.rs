// ============================================================================
// Persistence Channel Interface
// Fire-and-forget handoff of processed orders to a durable background
// worker (spec §4.6)
// ============================================================================

use thiserror::Error;

use crate::domain::{OrderResult, TradeVec};

/// A unit of work handed to the background persistence worker. Mirrors the
/// `{ order, trades }` payload shape from spec §4.6/§6.
#[derive(Debug, Clone)]
pub struct PersistenceJob {
    pub order: OrderResult,
    pub trades: TradeVec,
}

/// Enqueue failure. Always logged by the caller, never surfaced further
/// (spec §7: `EnqueueFailed` is logged, not surfaced to `submitOrder`'s caller).
#[derive(Debug, Error)]
#[error("persistence enqueue failed: {0}")]
pub struct EnqueueFailed(pub String);

/// Hands processed orders off to a durable background worker without
/// blocking the matching path.
pub trait PersistenceSink: Send + Sync {
    fn enqueue(&self, job: PersistenceJob) -> Result<(), EnqueueFailed>;
}

/// Default sink: an unbounded MPSC channel consumed by an out-of-scope
/// background worker.
pub struct ChannelPersistenceSink {
    sender: tokio::sync::mpsc::UnboundedSender<PersistenceJob>,
}

impl ChannelPersistenceSink {
    pub fn new(sender: tokio::sync::mpsc::UnboundedSender<PersistenceJob>) -> Self {
        Self { sender }
    }
}

impl PersistenceSink for ChannelPersistenceSink {
    fn enqueue(&self, job: PersistenceJob) -> Result<(), EnqueueFailed> {
        self.sender
            .send(job)
            .map_err(|e| EnqueueFailed(e.to_string()))
    }
}

/// Discards every job. Used in unit tests that don't care about persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpPersistenceSink;

impl PersistenceSink for NoOpPersistenceSink {
    fn enqueue(&self, _job: PersistenceJob) -> Result<(), EnqueueFailed> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketId, OrderId, OrderStatus, Side};
    use smallvec::SmallVec;
    use std::str::FromStr;

    fn sample_order() -> OrderResult {
        OrderResult {
            id: OrderId::new(),
            market_id: MarketId::new(),
            outcome_index: 0,
            side: Side::Bid,
            status: OrderStatus::Filled,
            filled_quantity: crate::numeric::Decimal::from_str("1").unwrap(),
            remaining_quantity: crate::numeric::Decimal::ZERO,
        }
    }

    #[test]
    fn test_noop_sink_always_succeeds() {
        let sink = NoOpPersistenceSink;
        let job = PersistenceJob {
            order: sample_order(),
            trades: SmallVec::new(),
        };
        assert!(sink.enqueue(job).is_ok());
    }

    #[test]
    fn test_channel_sink_delivers() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let sink = ChannelPersistenceSink::new(tx);
        let job = PersistenceJob {
            order: sample_order(),
            trades: SmallVec::new(),
        };
        sink.enqueue(job).unwrap();
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_channel_sink_reports_closed_receiver() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        drop(rx);
        let sink = ChannelPersistenceSink::new(tx);
        let job = PersistenceJob {
            order: sample_order(),
            trades: SmallVec::new(),
        };
        assert!(sink.enqueue(job).is_err());
    }
}
