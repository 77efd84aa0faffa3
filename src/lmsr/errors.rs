// ============================================================================
// LMSR Errors
// ============================================================================

use crate::numeric::DecimalError;
use thiserror::Error;

/// Errors raised by the LMSR cost/price/trade functions (spec §4.2, §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LmsrError {
    /// Liquidity parameter `b` must be strictly positive.
    #[error("liquidity parameter b must be strictly positive")]
    InvalidB,

    /// The outcome quantity vector must have at least one element.
    #[error("outcome quantity vector must be non-empty")]
    EmptyOutcomes,

    /// An outcome index was outside `[0, n)`.
    #[error("outcome index out of range")]
    IndexOutOfRange,

    /// Two vectors that should describe the same market have different
    /// lengths.
    #[error("quantity vectors must have the same length")]
    LengthMismatch,

    /// Applying a trade vector would make an outcome quantity negative.
    #[error("applying trade vector would produce a negative outcome quantity")]
    NegativeResult,

    /// A sell would reduce an outcome's outstanding quantity below zero.
    #[error("insufficient outstanding quantity for sell")]
    InsufficientOutstanding,

    /// An underlying decimal arithmetic operation failed.
    #[error(transparent)]
    Numeric(#[from] DecimalError),
}
