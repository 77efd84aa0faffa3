// ============================================================================
// Decimal Wire Format
// Lossless string round-trip at the crate's external precision boundary
// ============================================================================

use super::errors::{DecimalError, NumericResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fractional digits carried across the wire (HTTP payloads, pub/sub messages,
/// persistence jobs). `Decimal` itself can carry more internal scale during
/// computation; this is only the boundary format.
pub const WIRE_SCALE: u32 = 18;

/// Render a `Decimal` as a fixed-point string with exactly [`WIRE_SCALE`]
/// fractional digits, no thousands separator, no exponent, and an optional
/// leading `-`.
pub fn to_wire_string(value: Decimal) -> String {
    format!("{:.*}", WIRE_SCALE as usize, value)
}

/// Parse a fixed-point decimal string produced by [`to_wire_string`] (or any
/// plain decimal literal without exponent notation).
///
/// # Errors
/// Returns [`DecimalError::InvalidInput`] if the string is not a valid
/// decimal, or [`DecimalError::PrecisionLoss`] if it carries more fractional
/// digits than `Decimal` can represent without rounding.
pub fn from_wire_string(s: &str) -> NumericResult<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DecimalError::InvalidInput);
    }
    if s.contains(['e', 'E']) {
        return Err(DecimalError::InvalidInput);
    }

    let value = Decimal::from_str(s).map_err(|_| DecimalError::InvalidInput)?;

    if let Some(frac) = s.split('.').nth(1) {
        if frac.len() > Decimal::MAX_SCALE as usize {
            return Err(DecimalError::PrecisionLoss);
        }
    }

    Ok(value)
}
