// ============================================================================
// LMSR Engine
// Numerically stable cost, price, and trade-cost functions for a
// Logarithmic Market Scoring Rule market maker (spec §4.2)
// ============================================================================
//
// This module is pure, side-effect-free `Decimal` math: it has no dependency
// on the order book, the per-book queue, or any of the async machinery, so
// an out-of-scope HTTP quote endpoint can call it directly (spec §1, §6).

mod errors;

pub use errors::LmsrError;

use crate::numeric::{log_sum_exp, shifted_exponentials, Decimal};

/// Result of quoting a buy or sell of `quantity` shares of one outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Marginal price of the outcome before the trade.
    pub instant_price: Decimal,
    /// Signed cost of the trade: positive means the buyer pays, negative
    /// means the seller receives.
    pub trade_cost: Decimal,
    /// Outcome quantity vector after the trade is applied.
    pub q_after: Vec<Decimal>,
}

fn validate_market(q: &[Decimal], b: Decimal) -> Result<(), LmsrError> {
    if q.is_empty() {
        return Err(LmsrError::EmptyOutcomes);
    }
    if b <= Decimal::ZERO {
        return Err(LmsrError::InvalidB);
    }
    Ok(())
}

fn scaled_quantities(q: &[Decimal], b: Decimal) -> Result<Vec<Decimal>, LmsrError> {
    q.iter()
        .map(|qi| qi.checked_div(b).ok_or(LmsrError::Numeric(crate::numeric::DecimalError::Overflow)))
        .collect()
}

/// `C(q) = b · ln( Σᵢ exp(qᵢ / b) )`, computed via log-sum-exp.
///
/// # Errors
/// [`LmsrError::InvalidB`] if `b <= 0`; [`LmsrError::EmptyOutcomes`] if `q`
/// is empty.
pub fn cost(q: &[Decimal], b: Decimal) -> Result<Decimal, LmsrError> {
    validate_market(q, b)?;
    let xs = scaled_quantities(q, b)?;
    let lse = log_sum_exp(&xs)?;
    b.checked_mul(lse).ok_or(LmsrError::Numeric(crate::numeric::DecimalError::Overflow))
}

/// `pᵢ(q) = exp(qᵢ/b) / Σⱼ exp(qⱼ/b)`.
///
/// # Errors
/// [`LmsrError::IndexOutOfRange`] if `i ∉ [0, n)`, plus the `cost`-level
/// validation errors.
pub fn price(q: &[Decimal], b: Decimal, i: usize) -> Result<Decimal, LmsrError> {
    validate_market(q, b)?;
    if i >= q.len() {
        return Err(LmsrError::IndexOutOfRange);
    }
    let xs = scaled_quantities(q, b)?;
    let (exps, sum) = shifted_exponentials(&xs)?;
    exps[i]
        .checked_div(sum)
        .ok_or(LmsrError::Numeric(crate::numeric::DecimalError::DivisionByZero))
}

/// `Δ = C(qAfter) − C(qBefore)`.
///
/// # Errors
/// [`LmsrError::LengthMismatch`] if the two vectors differ in length.
pub fn trade_cost(q_before: &[Decimal], q_after: &[Decimal], b: Decimal) -> Result<Decimal, LmsrError> {
    if q_before.len() != q_after.len() {
        return Err(LmsrError::LengthMismatch);
    }
    let c_before = cost(q_before, b)?;
    let c_after = cost(q_after, b)?;
    c_after
        .checked_sub(c_before)
        .ok_or(LmsrError::Numeric(crate::numeric::DecimalError::Overflow))
}

/// `qAfter = q + Δq`, component-wise.
///
/// # Errors
/// [`LmsrError::LengthMismatch`] if lengths differ; [`LmsrError::NegativeResult`]
/// if any resulting component would be negative.
pub fn apply_trade_vector(q: &[Decimal], delta_q: &[Decimal]) -> Result<Vec<Decimal>, LmsrError> {
    if q.len() != delta_q.len() {
        return Err(LmsrError::LengthMismatch);
    }

    let mut out = Vec::with_capacity(q.len());
    for (qi, dqi) in q.iter().zip(delta_q) {
        let next = qi
            .checked_add(*dqi)
            .ok_or(LmsrError::Numeric(crate::numeric::DecimalError::Overflow))?;
        if next < Decimal::ZERO {
            return Err(LmsrError::NegativeResult);
        }
        out.push(next);
    }
    Ok(out)
}

/// Quote the effect of buying `quantity` shares of outcome `i`.
///
/// # Errors
/// See [`price`] and [`apply_trade_vector`].
pub fn quote_buy(q: &[Decimal], b: Decimal, i: usize, quantity: Decimal) -> Result<Quote, LmsrError> {
    validate_market(q, b)?;
    if i >= q.len() {
        return Err(LmsrError::IndexOutOfRange);
    }

    let instant_price = price(q, b, i)?;
    let mut delta_q = vec![Decimal::ZERO; q.len()];
    delta_q[i] = quantity;

    let q_after = apply_trade_vector(q, &delta_q)?;
    let trade_cost = trade_cost(q, &q_after, b)?;

    Ok(Quote {
        instant_price,
        trade_cost,
        q_after,
    })
}

/// Quote the effect of selling `quantity` shares of outcome `i`.
///
/// # Errors
/// [`LmsrError::InsufficientOutstanding`] if `q[i] − quantity < 0`; see also
/// [`price`] and [`apply_trade_vector`].
pub fn quote_sell(q: &[Decimal], b: Decimal, i: usize, quantity: Decimal) -> Result<Quote, LmsrError> {
    validate_market(q, b)?;
    if i >= q.len() {
        return Err(LmsrError::IndexOutOfRange);
    }

    let projected = q[i]
        .checked_sub(quantity)
        .ok_or(LmsrError::Numeric(crate::numeric::DecimalError::Underflow))?;
    if projected < Decimal::ZERO {
        return Err(LmsrError::InsufficientOutstanding);
    }

    let instant_price = price(q, b, i)?;
    let mut delta_q = vec![Decimal::ZERO; q.len()];
    delta_q[i] = -quantity;

    let q_after = apply_trade_vector(q, &delta_q)?;
    let trade_cost = trade_cost(q, &q_after, b)?;

    Ok(Quote {
        instant_price,
        trade_cost,
        q_after,
    })
}

/// Worst-case maker loss bound over any trajectory returning `q` to the
/// origin: `b · ln(n)`.
pub fn max_maker_loss(b: Decimal, n: usize) -> Result<Decimal, LmsrError> {
    if b <= Decimal::ZERO {
        return Err(LmsrError::InvalidB);
    }
    if n == 0 {
        return Err(LmsrError::EmptyOutcomes);
    }

    let n_dec = Decimal::from(n as u64);
    let ln_n = n_dec
        .checked_ln()
        .ok_or(LmsrError::Numeric(crate::numeric::DecimalError::NonPositiveLn))?;
    b.checked_mul(ln_n)
        .ok_or(LmsrError::Numeric(crate::numeric::DecimalError::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_symmetric_two_outcome_price_and_cost() {
        let q = vec![Decimal::ZERO, Decimal::ZERO];
        let b = d("100");

        let p0 = price(&q, b, 0).unwrap();
        let p1 = price(&q, b, 1).unwrap();
        assert_eq!(p0, d("0.5"));
        assert_eq!(p1, d("0.5"));

        let c = cost(&q, b).unwrap();
        // b * ln(2) ~= 69.3147180559945...
        let expected = b.checked_mul(d("2").checked_ln().unwrap()).unwrap();
        assert!((c - expected).abs() < d("0.0000000001"));
    }

    #[test]
    fn test_price_sums_to_one() {
        let q = vec![d("10"), d("3"), d("-4"), d("0")];
        let b = d("25");
        let mut total = Decimal::ZERO;
        for i in 0..q.len() {
            total += price(&q, b, i).unwrap();
        }
        assert!((total - Decimal::ONE).abs() < d("0.000000000000001"));
    }

    #[test]
    fn test_equal_components_split_evenly() {
        let q = vec![d("7"), d("7"), d("7")];
        let b = d("12");
        for i in 0..3 {
            let p = price(&q, b, i).unwrap();
            assert!((p - d("0.333333333333333333")).abs() < d("0.000000000000001"));
        }
    }

    #[test]
    fn test_stability_large_quantity_does_not_overflow() {
        let q = vec![d("10000"), Decimal::ZERO];
        let b = d("1");

        let p0 = price(&q, b, 0).unwrap();
        let p1 = price(&q, b, 1).unwrap();
        assert!((p0 - Decimal::ONE).abs() < d("0.0000001"));
        assert!(p1 < d("0.0000001"));

        let c = cost(&q, b).unwrap();
        assert!((c - d("10000")).abs() < d("0.0001"));
    }

    #[test]
    fn test_trade_cost_antisymmetry() {
        let q = vec![d("5"), d("5")];
        let b = d("10");
        let delta = vec![d("2"), d("-1")];
        let q_after = apply_trade_vector(&q, &delta).unwrap();

        let forward = trade_cost(&q, &q_after, b).unwrap();
        let backward = trade_cost(&q_after, &q, b).unwrap();
        assert!((forward + backward).abs() < d("0.000000000000000001"));
    }

    #[test]
    fn test_apply_trade_vector_rejects_negative_result() {
        let q = vec![d("1"), d("1")];
        let delta = vec![d("-2"), Decimal::ZERO];
        assert_eq!(apply_trade_vector(&q, &delta), Err(LmsrError::NegativeResult));
    }

    #[test]
    fn test_apply_trade_vector_length_mismatch() {
        let q = vec![d("1"), d("1")];
        let delta = vec![d("1")];
        assert_eq!(apply_trade_vector(&q, &delta), Err(LmsrError::LengthMismatch));
    }

    #[test]
    fn test_cost_rejects_invalid_b() {
        let q = vec![d("1")];
        assert_eq!(cost(&q, Decimal::ZERO), Err(LmsrError::InvalidB));
        assert_eq!(cost(&q, d("-1")), Err(LmsrError::InvalidB));
    }

    #[test]
    fn test_cost_rejects_empty_outcomes() {
        assert_eq!(cost(&[], d("1")), Err(LmsrError::EmptyOutcomes));
    }

    #[test]
    fn test_price_rejects_index_out_of_range() {
        let q = vec![d("1"), d("1")];
        assert_eq!(price(&q, d("1"), 5), Err(LmsrError::IndexOutOfRange));
    }

    #[test]
    fn test_quote_buy_increases_price() {
        let q = vec![Decimal::ZERO, Decimal::ZERO];
        let b = d("50");
        let quote = quote_buy(&q, b, 0, d("10")).unwrap();
        assert_eq!(quote.instant_price, d("0.5"));
        assert!(quote.trade_cost > Decimal::ZERO);
        let new_price = price(&quote.q_after, b, 0).unwrap();
        assert!(new_price > quote.instant_price);
    }

    #[test]
    fn test_quote_sell_insufficient_outstanding() {
        let q = vec![d("5"), d("10")];
        let b = d("20");
        assert_eq!(
            quote_sell(&q, b, 0, d("6")),
            Err(LmsrError::InsufficientOutstanding)
        );
    }

    #[test]
    fn test_quote_sell_decreases_price() {
        let q = vec![d("10"), d("10")];
        let b = d("20");
        let quote = quote_sell(&q, b, 0, d("4")).unwrap();
        assert!(quote.trade_cost < Decimal::ZERO);
        let new_price = price(&quote.q_after, b, 0).unwrap();
        assert!(new_price < quote.instant_price);
    }

    #[test]
    fn test_max_maker_loss_bound() {
        let b = d("100");
        let n = 2;
        let bound = max_maker_loss(b, n).unwrap();
        let expected = b.checked_mul(Decimal::from(n as u64).checked_ln().unwrap()).unwrap();
        assert_eq!(bound, expected);
    }

    #[test]
    fn test_max_maker_loss_rejects_invalid_inputs() {
        assert_eq!(max_maker_loss(Decimal::ZERO, 2), Err(LmsrError::InvalidB));
        assert_eq!(max_maker_loss(d("1"), 0), Err(LmsrError::EmptyOutcomes));
    }
}
