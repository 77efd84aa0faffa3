// ============================================================================
// Engine Handle
// Top-level entry point: owns the process-wide queue registry (spec §3, §9)
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::EngineConfig;
use crate::domain::{OrderInput, ProcessedOrder};
use crate::errors::EngineError;
use crate::interfaces::{ContinuousDoubleAuction, EventPublisher, MatchingAlgorithm, NoOpEventPublisher, NoOpPersistenceSink, PersistenceSink};

use super::key::BookKey;
use super::queue::MarketQueue;

/// The single public entry point (spec §6, `submitOrder`). Process-wide
/// registries of queues are represented as explicit state owned by this
/// handle rather than global mutable state, per spec §9, so tests can spin
/// up independent engines.
pub struct Engine {
    queues: RwLock<HashMap<BookKey, Arc<MarketQueue>>>,
    algorithm: Arc<dyn MatchingAlgorithm>,
    publisher: Arc<dyn EventPublisher>,
    persistence: Arc<dyn PersistenceSink>,
    config: Arc<EngineConfig>,
}

impl Engine {
    pub fn new(
        algorithm: Arc<dyn MatchingAlgorithm>,
        publisher: Arc<dyn EventPublisher>,
        persistence: Arc<dyn PersistenceSink>,
        config: EngineConfig,
    ) -> Self {
        Self {
            queues: RwLock::new(HashMap::new()),
            algorithm,
            publisher,
            persistence,
            config: Arc::new(config),
        }
    }

    /// An engine with the production matching algorithm and no-op event/
    /// persistence collaborators — convenient for tests and for embedders
    /// who only need the in-memory book behavior.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(ContinuousDoubleAuction),
            Arc::new(NoOpEventPublisher),
            Arc::new(NoOpPersistenceSink),
            EngineConfig::default(),
        )
    }

    /// Append `input` to its `(marketId, outcomeIndex)` queue and await the
    /// resulting trades and snapshot. Queues and books are created lazily on
    /// first submission and live for the process (spec §3).
    pub async fn submit_order(&self, input: OrderInput) -> Result<ProcessedOrder, EngineError> {
        let key = BookKey::new(input.market_id, input.outcome_index);
        let queue = self.queue_for(key);

        queue
            .submit(
                input,
                Arc::clone(&self.algorithm),
                Arc::clone(&self.publisher),
                Arc::clone(&self.persistence),
                Arc::clone(&self.config),
            )
            .await
    }

    fn queue_for(&self, key: BookKey) -> Arc<MarketQueue> {
        if let Some(queue) = self.queues.read().get(&key) {
            return Arc::clone(queue);
        }

        let mut queues = self.queues.write();
        Arc::clone(queues.entry(key).or_insert_with(|| {
            tracing::info!(book = %key, "creating market queue");
            Arc::new(MarketQueue::new(key))
        }))
    }
}
