// ============================================================================
// Trade Domain Model
// ============================================================================

use chrono::{DateTime, Utc};

use super::ids::{MarketId, OrderId, TradeId, UserRef};
use super::order::Side;
use crate::numeric::Decimal;

use serde::{Deserialize, Serialize};

/// A single fill produced by `processOrder` (spec §3, `ExecutedTrade`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct ExecutedTrade {
    pub id: TradeId,
    pub market_id: MarketId,
    pub outcome_index: u32,

    /// The resting order that was matched against.
    pub maker_order_id: OrderId,
    /// The incoming order that caused the match.
    pub taker_order_id: OrderId,
    /// Identity of the taker. Self-trades are never filtered by this crate —
    /// policing them is an upstream concern.
    pub taker: UserRef,

    /// Side of the taker.
    pub side: Side,
    /// Execution price, always the resting (maker) order's price.
    pub price: Decimal,
    pub quantity: Decimal,
    pub executed_at: DateTime<Utc>,
}

impl ExecutedTrade {
    pub fn notional_value(&self) -> Decimal {
        self.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_notional_value() {
        let trade = ExecutedTrade {
            id: TradeId::new(),
            market_id: MarketId::new(),
            outcome_index: 0,
            maker_order_id: OrderId::new(),
            taker_order_id: OrderId::new(),
            taker: UserRef::User("bob".to_string()),
            side: Side::Bid,
            price: Decimal::from_str("0.65").unwrap(),
            quantity: Decimal::from_str("4").unwrap(),
            executed_at: Utc::now(),
        };

        assert_eq!(trade.notional_value(), Decimal::from_str("2.60").unwrap());
    }
}
