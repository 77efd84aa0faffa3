// ============================================================================
// Order Domain Model
// ============================================================================

use super::errors::OrderBookError;
use super::ids::{MarketId, OrderId, UserRef};
use crate::numeric::Decimal;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
    Ioc,
}

/// The caller-facing request that drives `processOrder` (spec §3, `OrderInput`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct OrderInput {
    pub market_id: MarketId,
    pub outcome_index: u32,
    pub side: Side,
    pub order_type: OrderType,
    /// Required for LIMIT, ignored for MARKET, optional for IOC (absence means
    /// any price).
    pub price: Option<Decimal>,
    pub quantity: Decimal,
    pub submitter: UserRef,
}

impl OrderInput {
    /// Structural validation that must pass before any book mutation is
    /// attempted — failure never touches book state (spec §7 policy).
    pub fn validate(&self) -> Result<(), OrderBookError> {
        if self.quantity <= Decimal::ZERO {
            return Err(OrderBookError::InvalidQuantity);
        }

        match self.order_type {
            OrderType::Limit => match self.price {
                Some(p) if p > Decimal::ZERO => {},
                Some(_) => return Err(OrderBookError::InvalidPrice),
                None => return Err(OrderBookError::InvalidPrice),
            },
            OrderType::Market => {},
            OrderType::Ioc => {
                if let Some(p) = self.price {
                    if p <= Decimal::ZERO {
                        return Err(OrderBookError::InvalidPrice);
                    }
                }
            },
        }

        Ok(())
    }

    pub fn is_limit(&self) -> bool {
        matches!(self.order_type, OrderType::Limit)
    }
}

/// Final disposition of a submitted order once `processOrder` returns (spec
/// §3, `ProcessedOrder.order`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub enum OrderStatus {
    Filled,
    PartiallyFilled,
    Resting,
    CancelledIoc,
}

/// A resting order held in an `OrderBookState` price level, ordered within
/// its level by `sequence` (arrival order).
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct RestingOrder {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub remaining: Decimal,
    pub sequence: u64,
    pub submitter: UserRef,
}

/// The final state of the order that was submitted, echoed back to the
/// caller as part of `ProcessedOrder`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct OrderResult {
    pub id: OrderId,
    pub market_id: MarketId,
    pub outcome_index: u32,
    pub side: Side,
    pub status: OrderStatus,
    pub filled_quantity: Decimal,
    pub remaining_quantity: Decimal,
}
