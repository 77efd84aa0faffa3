// ============================================================================
// Order Book Errors
// ============================================================================

use thiserror::Error;

/// Errors raised while validating or processing an order against a book
/// (spec §4.3, §7).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBookError {
    /// `quantity` was not strictly positive.
    #[error("order quantity must be positive")]
    InvalidQuantity,

    /// A LIMIT order was submitted without a price, or with a non-positive one.
    #[error("limit order price must be positive")]
    InvalidPrice,

    /// `outcomeIndex` did not address a valid outcome of the market.
    #[error("outcome index out of range")]
    InvalidOutcomeIndex,

    /// The order type was not one of LIMIT/MARKET/IOC.
    #[error("unknown order type")]
    UnknownOrderType,

    /// A post-condition of `processOrder` was violated — this indicates a bug
    /// in the matching algorithm, not a caller error. The book mutation up to
    /// the point of detection is not rolled back; the caller must treat the
    /// book as suspect.
    #[error("internal invariant violation: {0}")]
    Invariant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            OrderBookError::InvalidQuantity.to_string(),
            "order quantity must be positive"
        );
        assert_eq!(
            OrderBookError::Invariant("crossed book".to_string()).to_string(),
            "internal invariant violation: crossed book"
        );
    }
}
