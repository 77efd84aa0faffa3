// ============================================================================
// Engine Errors
// Top-level error surfaced by `Engine::submit_order` (spec §7)
// ============================================================================

use thiserror::Error;

use crate::domain::OrderBookError;

/// Errors surfaced to a caller of [`crate::engine::Engine::submit_order`].
///
/// `EnqueueFailed` from the persistence channel is deliberately absent: per
/// spec it is logged and never surfaced to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Validation or processing failure from the order book; no state change.
    #[error(transparent)]
    OrderBook(#[from] OrderBookError),

    /// Event publishing failed after the order was already committed to the
    /// book. The in-memory mutation is not rolled back.
    #[error("event publish failed: {0}")]
    PublishFailed(String),

    /// A book post-condition was violated. Surfaced rather than aborting the
    /// process, since this crate is a library embedded in a host process.
    #[error("fatal invariant violation: {0}")]
    Invariant(String),
}
