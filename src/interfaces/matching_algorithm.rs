// ============================================================================
// Matching Algorithm Interface
// Strategy pattern over `OrderBookState::process_order` (spec §4.3)
// ============================================================================

use crate::domain::{OrderBookError, OrderBookState, OrderInput, ProcessedOrder};

/// Pluggable matching strategy. The crate ships one implementation —
/// [`ContinuousDoubleAuction`] — but the engine holds it behind a trait
/// object rather than calling `OrderBookState::process_order` directly, so
/// an embedder can swap in a different crossing policy without touching the
/// per-book queue or event/persistence plumbing.
pub trait MatchingAlgorithm: Send + Sync {
    fn process_order(
        &self,
        book: &mut OrderBookState,
        input: OrderInput,
        snapshot_depth: usize,
    ) -> Result<ProcessedOrder, OrderBookError>;

    /// Name used in logging/metrics.
    fn name(&self) -> &str;
}

/// Price-then-time priority continuous double auction (spec §4.3).
#[derive(Debug, Default, Clone, Copy)]
pub struct ContinuousDoubleAuction;

impl MatchingAlgorithm for ContinuousDoubleAuction {
    fn process_order(
        &self,
        book: &mut OrderBookState,
        input: OrderInput,
        snapshot_depth: usize,
    ) -> Result<ProcessedOrder, OrderBookError> {
        book.process_order(input, snapshot_depth)
    }

    fn name(&self) -> &str {
        "continuous-double-auction"
    }
}
