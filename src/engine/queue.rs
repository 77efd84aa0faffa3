// ============================================================================
// Per-Book Order Queue
// FIFO serializer: exactly one in-flight `processOrder` per book (spec §4.4)
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::config::EngineConfig;
use crate::domain::{OrderBookState, OrderInput, ProcessedOrder};
use crate::errors::EngineError;
use crate::interfaces::{EngineEvent, EventPublisher, MatchingAlgorithm, PersistenceJob, PersistenceSink};

use super::key::BookKey;

struct QueuedOrder {
    input: OrderInput,
    responder: oneshot::Sender<Result<ProcessedOrder, EngineError>>,
}

struct QueueState {
    pending: VecDeque<QueuedOrder>,
    processing: bool,
}

/// One per `(marketId, outcomeIndex)`. Owns the book and the FIFO of queued
/// orders; guarantees at most one `process_order` call in flight at a time.
pub struct MarketQueue {
    key: BookKey,
    state: tokio::sync::Mutex<QueueState>,
    book: tokio::sync::Mutex<OrderBookState>,
}

impl MarketQueue {
    pub fn new(key: BookKey) -> Self {
        Self {
            book: tokio::sync::Mutex::new(OrderBookState::new(key.market_id, key.outcome_index)),
            state: tokio::sync::Mutex::new(QueueState {
                pending: VecDeque::new(),
                processing: false,
            }),
            key,
        }
    }

    /// Append `input` to this book's queue and, if idle, spawn a drain task.
    /// Resolves once the order has been processed, its events published, and
    /// its persistence job enqueued.
    pub async fn submit(
        self: &Arc<Self>,
        input: OrderInput,
        algorithm: Arc<dyn MatchingAlgorithm>,
        publisher: Arc<dyn EventPublisher>,
        persistence: Arc<dyn PersistenceSink>,
        config: Arc<EngineConfig>,
    ) -> Result<ProcessedOrder, EngineError> {
        let (tx, rx) = oneshot::channel();

        let should_spawn = {
            let mut state = self.state.lock().await;
            state.pending.push_back(QueuedOrder { input, responder: tx });
            if state.processing {
                false
            } else {
                state.processing = true;
                true
            }
        };

        if should_spawn {
            let queue = Arc::clone(self);
            tokio::spawn(async move {
                queue.drain(algorithm, publisher, persistence, config).await;
            });
        }

        // A dropped responder (the drain task panicked) surfaces as a fatal
        // invariant rather than silently hanging the caller.
        rx.await.unwrap_or_else(|_| {
            Err(EngineError::Invariant(
                "market queue drain task dropped without resolving the order".to_string(),
            ))
        })
    }

    async fn drain(
        self: Arc<Self>,
        algorithm: Arc<dyn MatchingAlgorithm>,
        publisher: Arc<dyn EventPublisher>,
        persistence: Arc<dyn PersistenceSink>,
        config: Arc<EngineConfig>,
    ) {
        loop {
            let queued = {
                let mut state = self.state.lock().await;
                state.pending.pop_front()
            };

            let Some(queued) = queued else {
                let mut state = self.state.lock().await;
                if state.pending.is_empty() {
                    state.processing = false;
                    break;
                }
                // An order snuck in between the pop above and taking this
                // lock; keep draining instead of racing a fresh spawn.
                continue;
            };

            let result = self
                .process_one(queued.input, &algorithm, &publisher, &persistence, &config)
                .await;
            let _ = queued.responder.send(result);

            if config.cooperative_yield {
                tokio::task::yield_now().await;
            }
        }
    }

    async fn process_one(
        &self,
        input: OrderInput,
        algorithm: &Arc<dyn MatchingAlgorithm>,
        publisher: &Arc<dyn EventPublisher>,
        persistence: &Arc<dyn PersistenceSink>,
        config: &EngineConfig,
    ) -> Result<ProcessedOrder, EngineError> {
        let processed = {
            let mut book = self.book.lock().await;
            algorithm.process_order(&mut book, input, config.snapshot_depth)?
        };

        tracing::debug!(book = %self.key, trades = processed.trades.len(), "order processed");

        publisher
            .publish(EngineEvent::OrderBookUpdate {
                market_id: self.key.market_id,
                outcome_index: self.key.outcome_index,
                snapshot: processed.snapshot.clone(),
            })
            .await?;

        publisher
            .publish(EngineEvent::MarketUpdate {
                market_id: self.key.market_id,
                reason: "orderbook".to_string(),
            })
            .await?;

        for trade in processed.trades.iter() {
            publisher
                .publish(EngineEvent::Trade { trade: trade.clone() })
                .await?;
        }

        if let Err(e) = persistence.enqueue(PersistenceJob {
            order: processed.order.clone(),
            trades: processed.trades.clone(),
        }) {
            tracing::warn!(book = %self.key, error = %e, "persistence enqueue failed");
        }

        Ok(processed)
    }
}
