// ============================================================================
// Numeric Module
// High-precision decimal arithmetic for LMSR and order-book calculations
// ============================================================================
//
// This module provides:
// - `Decimal`: re-export of `rust_decimal::Decimal`, the sole monetary/
//   quantity type used anywhere on the matching path
// - `DecimalError`: error types for arithmetic operations
// - `to_wire_string`/`from_wire_string`: the 18-fractional-digit external
//   wire format (see spec §6)
// - `log_sum_exp`/`shifted_exponentials`: the numerically stable building
//   blocks the LMSR engine is required to use (spec §4.2)
//
// Design principles:
// - No floating-point operations anywhere outside this module's `ln`/`exp`
//   calls, which themselves run entirely in `Decimal`
// - All arithmetic returns `Result` (no panics on the monetary path)

mod errors;
mod wire;

pub use errors::{DecimalError, NumericResult};
pub use wire::{from_wire_string, to_wire_string, WIRE_SCALE};

pub use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

/// Below this shifted exponent, `exp` underflows to less than `Decimal`'s
/// smallest representable increment (`1e-28`) and contributes nothing to the
/// sum. `rust_decimal::checked_exp` evaluates a negative argument as
/// `1 / exp(-x)`, so calling it on a very negative shift computes `exp` of
/// the *unshifted* magnitude first and overflows — treating anything past
/// this floor as exactly zero sidesteps that call entirely.
const NEG_EXP_FLOOR: i64 = -60;

/// Compute the shifted exponentials `exp(xᵢ − M)` where `M = maxᵢ xᵢ`, plus
/// their sum. This is the shared numerically-stable building block behind
/// both `cost` (log-sum-exp) and `price` (normalized shifted exponentials) —
/// see spec §4.2.
///
/// # Errors
/// [`DecimalError::InvalidInput`] if `xs` is empty; [`DecimalError::Overflow`]
/// if an intermediate `exp` or the running sum overflows `Decimal`.
pub fn shifted_exponentials(xs: &[Decimal]) -> NumericResult<(Vec<Decimal>, Decimal)> {
    if xs.is_empty() {
        return Err(DecimalError::InvalidInput);
    }

    let m = xs
        .iter()
        .copied()
        .fold(xs[0], |acc, x| if x > acc { x } else { acc });

    let mut exps = Vec::with_capacity(xs.len());
    let mut sum = Decimal::ZERO;

    for &x in xs {
        let shifted = x.checked_sub(m).ok_or(DecimalError::Underflow)?;
        let e = if shifted < Decimal::from(NEG_EXP_FLOOR) {
            Decimal::ZERO
        } else {
            shifted.checked_exp().ok_or(DecimalError::Overflow)?
        };
        sum = sum.checked_add(e).ok_or(DecimalError::Overflow)?;
        exps.push(e);
    }

    Ok((exps, sum))
}

/// Numerically stable `ln(Σ exp(xᵢ))` via the log-sum-exp identity:
/// `ln Σ exp(xᵢ) = M + ln Σ exp(xᵢ − M)`, `M = maxᵢ xᵢ`.
///
/// # Errors
/// See [`shifted_exponentials`]; additionally [`DecimalError::NonPositiveLn`]
/// can never actually trigger here since the shifted sum is always `≥ 1`
/// (the term at the max contributes `exp(0) = 1`), but the `ln` call is still
/// routed through the checked form defensively.
pub fn log_sum_exp(xs: &[Decimal]) -> NumericResult<Decimal> {
    let m = xs
        .iter()
        .copied()
        .fold(*xs.first().ok_or(DecimalError::InvalidInput)?, |acc, x| {
            if x > acc {
                x
            } else {
                acc
            }
        });

    let (_, sum) = shifted_exponentials(xs)?;
    let ln_sum = sum.checked_ln().ok_or(DecimalError::NonPositiveLn)?;
    m.checked_add(ln_sum).ok_or(DecimalError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_log_sum_exp_symmetric_zero() {
        // ln(exp(0) + exp(0)) = ln(2)
        let result = log_sum_exp(&[Decimal::ZERO, Decimal::ZERO]).unwrap();
        let expected = d("2").checked_ln().unwrap();
        assert!((result - expected).abs() < d("0.000000000000000001"));
    }

    #[test]
    fn test_log_sum_exp_does_not_overflow_on_large_shifted_input() {
        // exp(10000) would overflow Decimal directly; with one huge and one
        // zero term the shift by the max keeps every exponent <= 0.
        let result = log_sum_exp(&[d("10000"), Decimal::ZERO]);
        assert!(result.is_ok());
        // ln(exp(10000) + exp(0)) ~= 10000 (the zero term is negligible)
        let result = result.unwrap();
        assert!((result - d("10000")).abs() < d("0.0001"));
    }

    #[test]
    fn test_shifted_exponentials_empty_input() {
        assert_eq!(shifted_exponentials(&[]), Err(DecimalError::InvalidInput));
    }

    #[test]
    fn test_shifted_exponentials_sums_to_at_least_one() {
        let (_, sum) = shifted_exponentials(&[d("5"), d("1"), d("-3")]).unwrap();
        assert!(sum >= Decimal::ONE);
    }

    #[test]
    fn test_shifted_exponentials_clamps_far_below_floor_to_zero() {
        // The far-from-max term shifts to -10000, well past `NEG_EXP_FLOOR`;
        // it must come back as exactly zero rather than overflowing.
        let (exps, sum) = shifted_exponentials(&[d("10000"), Decimal::ZERO]).unwrap();
        assert_eq!(exps[1], Decimal::ZERO);
        assert_eq!(sum, Decimal::ONE);
    }

    #[test]
    fn test_log_sum_exp_handles_many_far_outliers() {
        // A wide spread of outcome quantities, as the LMSR price function
        // would see with a small liquidity parameter: every non-max term
        // shifts past the floor and must not overflow `checked_exp`.
        let xs: Vec<Decimal> = vec![d("20000"), d("-20000"), Decimal::ZERO, d("-500")];
        assert!(log_sum_exp(&xs).is_ok());
    }
}
