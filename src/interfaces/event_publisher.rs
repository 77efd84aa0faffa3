// ============================================================================
// Event Publisher Interface
// Defines the contract for publishing order-book/market/trade events
// (spec §4.5, §6)
// ============================================================================

use async_trait::async_trait;

use crate::domain::{ExecutedTrade, MarketId, OrderBookSnapshot};
use crate::errors::EngineError;

use serde::{Deserialize, Serialize};

/// The three event categories published, in order, after each processed
/// order (spec §4.5). All three travel over the same underlying transport;
/// the channel name a subscriber cares about is implied by the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub enum EngineEvent {
    OrderBookUpdate {
        market_id: MarketId,
        outcome_index: u32,
        snapshot: OrderBookSnapshot,
    },
    MarketUpdate {
        market_id: MarketId,
        reason: String,
    },
    Trade {
        trade: ExecutedTrade,
    },
}

impl EngineEvent {
    /// The pub/sub channel name this event belongs on (spec §6).
    pub fn channel(&self) -> &'static str {
        match self {
            EngineEvent::OrderBookUpdate { .. } => "order-book-update",
            EngineEvent::MarketUpdate { .. } => "market-updates",
            EngineEvent::Trade { .. } => "trades",
        }
    }
}

/// Publishes engine events to downstream subscribers. Implementations can
/// handle websocket fan-out, metrics, or anything else — that wiring lives
/// outside this crate's scope.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EngineEvent) -> Result<(), EngineError>;
}

/// Default transport: an in-memory `tokio::sync::broadcast` channel shared
/// by all three event categories.
pub struct BroadcastEventPublisher {
    sender: tokio::sync::broadcast::Sender<EngineEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = tokio::sync::broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: EngineEvent) -> Result<(), EngineError> {
        // No active subscribers is not an error: events are fire-and-forget
        // from the matching path's point of view.
        match self.sender.send(event) {
            Ok(_) | Err(tokio::sync::broadcast::error::SendError(_)) => Ok(()),
        }
    }
}

/// Discards every event. Used in unit tests that don't care about fan-out.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: EngineEvent) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Decorator that emits a `tracing::debug!` span per publish before
/// delegating to an inner publisher.
pub struct LoggingEventPublisher<P> {
    inner: P,
}

impl<P> LoggingEventPublisher<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: EventPublisher> EventPublisher for LoggingEventPublisher<P> {
    async fn publish(&self, event: EngineEvent) -> Result<(), EngineError> {
        tracing::debug!(channel = event.channel(), "publishing engine event");
        self.inner.publish(event).await
    }
}
