// ============================================================================
// Numeric Errors
// Error types for high-precision decimal operations
// ============================================================================

use thiserror::Error;

/// Errors that can occur during decimal arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// Result exceeded the representable range of `Decimal`.
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,

    /// Result fell below the representable range of `Decimal`.
    #[error("arithmetic underflow: result below minimum value")]
    Underflow,

    /// Attempted division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Conversion would lose significant digits beyond the wire precision.
    #[error("precision loss: conversion would lose significant digits")]
    PrecisionLoss,

    /// Input string or value could not be parsed as a decimal.
    #[error("invalid input: could not parse value as a decimal")]
    InvalidInput,

    /// `ln` was called on a value that is not strictly positive.
    #[error("ln is only defined for strictly positive values")]
    NonPositiveLn,
}

/// Result type alias for numeric operations.
pub type NumericResult<T> = Result<T, DecimalError>;
