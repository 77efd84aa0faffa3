// ============================================================================
// Order Book Domain Model
// Continuous double auction: price-then-time priority on both sides
// ============================================================================

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use super::errors::OrderBookError;
use super::ids::{MarketId, OrderId};
use super::order::{OrderInput, OrderResult, OrderStatus, OrderType, RestingOrder, Side};
use super::trade::ExecutedTrade;
use crate::numeric::Decimal;

use serde::{Deserialize, Serialize};

/// Typical number of trades a single incoming order produces; inlined to
/// avoid a heap allocation on the common one-or-two-fill path.
pub type TradeVec = SmallVec<[ExecutedTrade; 4]>;

/// The price a crossing loop gates against. MARKET orders ignore whatever
/// `price` they were constructed with (spec §3) and cross at any price;
/// LIMIT and IOC orders cross only up to their stated price, or at any price
/// if an IOC carries none.
fn effective_limit(input: &OrderInput) -> Option<Decimal> {
    match input.order_type {
        OrderType::Market => None,
        OrderType::Limit | OrderType::Ioc => input.price,
    }
}

/// An aggregated price level as shown in an `OrderBookSnapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub total_quantity: Decimal,
}

/// Top-K view of a book at a point in time (spec §3, `OrderBookSnapshot`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub market_id: MarketId,
    pub outcome_index: u32,
    /// Highest price first.
    pub bids: Vec<PriceLevel>,
    /// Lowest price first.
    pub asks: Vec<PriceLevel>,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub last_trade_price: Option<Decimal>,
}

/// Outcome of `processOrder`: the submitted order's final disposition, the
/// trades it produced, and the resulting book snapshot (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedOrder {
    pub order: OrderResult,
    pub trades: TradeVec,
    pub snapshot: OrderBookSnapshot,
}

/// In-memory state for one `(marketId, outcomeIndex)` book. Single-writer by
/// construction: the per-book queue (`engine::queue`) guarantees at most one
/// `process_order` call executes at a time for a given book.
#[derive(Debug)]
pub struct OrderBookState {
    market_id: MarketId,
    outcome_index: u32,
    /// Price -> FIFO queue of resting orders at that price, ascending by price.
    bids: BTreeMap<Decimal, VecDeque<RestingOrder>>,
    asks: BTreeMap<Decimal, VecDeque<RestingOrder>>,
    next_sequence: u64,
    last_trade_price: Option<Decimal>,
    /// Timestamp of the most recently emitted trade, used to keep
    /// `ExecutedTrade::executed_at` monotonic per book regardless of
    /// wall-clock adjustments.
    last_executed_at: DateTime<Utc>,
}

impl OrderBookState {
    pub fn new(market_id: MarketId, outcome_index: u32) -> Self {
        Self {
            market_id,
            outcome_index,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            next_sequence: 0,
            last_trade_price: None,
            last_executed_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Strictly increasing per book: if wall-clock time has not advanced (or
    /// has regressed) since the last trade, ticks one nanosecond past it
    /// instead of repeating or going backwards.
    fn next_trade_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = if now > self.last_executed_at {
            now
        } else {
            self.last_executed_at + chrono::Duration::nanoseconds(1)
        };
        self.last_executed_at = next;
        next
    }

    /// The only mutator of book state (spec §4.3). Validates the input,
    /// crosses it against the resting opposite side, rests or discards any
    /// residual, and returns the resulting trades and snapshot.
    pub fn process_order(
        &mut self,
        input: OrderInput,
        snapshot_depth: usize,
    ) -> Result<ProcessedOrder, OrderBookError> {
        input.validate()?;
        if input.outcome_index != self.outcome_index {
            return Err(OrderBookError::InvalidOutcomeIndex);
        }

        let order_id = OrderId::new();
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let mut remaining = input.quantity;
        let mut trades: TradeVec = SmallVec::new();

        match input.side {
            Side::Bid => self.cross_bid(&input, order_id, &mut remaining, &mut trades),
            Side::Ask => self.cross_ask(&input, order_id, &mut remaining, &mut trades),
        }

        let filled = input.quantity - remaining;

        let status = match input.order_type {
            OrderType::Limit => {
                if remaining == Decimal::ZERO {
                    OrderStatus::Filled
                } else {
                    self.rest(&input, order_id, sequence, remaining);
                    if filled > Decimal::ZERO {
                        OrderStatus::PartiallyFilled
                    } else {
                        OrderStatus::Resting
                    }
                }
            },
            OrderType::Market | OrderType::Ioc => {
                // Any residual quantity is discarded, never rested.
                if filled == Decimal::ZERO {
                    OrderStatus::CancelledIoc
                } else if remaining == Decimal::ZERO {
                    OrderStatus::Filled
                } else {
                    OrderStatus::PartiallyFilled
                }
            },
        };

        if let Some(last) = trades.last() {
            self.last_trade_price = Some(last.price);
        }

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid >= ask {
                return Err(OrderBookError::Invariant(format!(
                    "book crossed after processing: best_bid={bid} best_ask={ask}"
                )));
            }
        }

        let order = OrderResult {
            id: order_id,
            market_id: self.market_id,
            outcome_index: self.outcome_index,
            side: input.side,
            status,
            filled_quantity: filled,
            remaining_quantity: remaining,
        };

        Ok(ProcessedOrder {
            order,
            trades,
            snapshot: self.snapshot(snapshot_depth),
        })
    }

    fn cross_bid(
        &mut self,
        input: &OrderInput,
        taker_order_id: OrderId,
        remaining: &mut Decimal,
        trades: &mut TradeVec,
    ) {
        let effective_limit = effective_limit(input);

        while *remaining > Decimal::ZERO {
            let Some((&best_price, _)) = self.asks.iter().next() else {
                break;
            };
            let crosses = match effective_limit {
                Some(limit) => best_price <= limit,
                None => true,
            };
            if !crosses {
                break;
            }

            let level = self.asks.get_mut(&best_price).expect("level present");
            let Some(mut maker) = level.pop_front() else {
                self.asks.remove(&best_price);
                continue;
            };

            let trade_qty = (*remaining).min(maker.remaining);
            let executed_at = self.next_trade_timestamp();
            trades.push(ExecutedTrade {
                id: super::ids::TradeId::new(),
                market_id: self.market_id,
                outcome_index: self.outcome_index,
                maker_order_id: maker.id,
                taker_order_id,
                taker: input.submitter.clone(),
                side: Side::Bid,
                price: best_price,
                quantity: trade_qty,
                executed_at,
            });

            *remaining -= trade_qty;
            maker.remaining -= trade_qty;

            if maker.remaining > Decimal::ZERO {
                level.push_front(maker);
            } else if level.is_empty() {
                self.asks.remove(&best_price);
            }
        }
    }

    fn cross_ask(
        &mut self,
        input: &OrderInput,
        taker_order_id: OrderId,
        remaining: &mut Decimal,
        trades: &mut TradeVec,
    ) {
        let effective_limit = effective_limit(input);

        while *remaining > Decimal::ZERO {
            let Some((&best_price, _)) = self.bids.iter().next_back() else {
                break;
            };
            let crosses = match effective_limit {
                Some(limit) => best_price >= limit,
                None => true,
            };
            if !crosses {
                break;
            }

            let level = self.bids.get_mut(&best_price).expect("level present");
            let Some(mut maker) = level.pop_front() else {
                self.bids.remove(&best_price);
                continue;
            };

            let trade_qty = (*remaining).min(maker.remaining);
            let executed_at = self.next_trade_timestamp();
            trades.push(ExecutedTrade {
                id: super::ids::TradeId::new(),
                market_id: self.market_id,
                outcome_index: self.outcome_index,
                maker_order_id: maker.id,
                taker_order_id,
                taker: input.submitter.clone(),
                side: Side::Ask,
                price: best_price,
                quantity: trade_qty,
                executed_at,
            });

            *remaining -= trade_qty;
            maker.remaining -= trade_qty;

            if maker.remaining > Decimal::ZERO {
                level.push_front(maker);
            } else if level.is_empty() {
                self.bids.remove(&best_price);
            }
        }
    }

    fn rest(&mut self, input: &OrderInput, order_id: OrderId, sequence: u64, remaining: Decimal) {
        let price = input.price.expect("limit order validated to carry a price");
        let resting = RestingOrder {
            id: order_id,
            side: input.side,
            price,
            remaining,
            sequence,
            submitter: input.submitter.clone(),
        };

        let book_side = match input.side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        book_side.entry(price).or_default().push_back(resting);
    }

    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        let bids = self
            .bids
            .iter()
            .rev()
            .take(depth)
            .map(|(&price, orders)| PriceLevel {
                price,
                total_quantity: orders.iter().fold(Decimal::ZERO, |acc, o| acc + o.remaining),
            })
            .collect();

        let asks = self
            .asks
            .iter()
            .take(depth)
            .map(|(&price, orders)| PriceLevel {
                price,
                total_quantity: orders.iter().fold(Decimal::ZERO, |acc, o| acc + o.remaining),
            })
            .collect();

        OrderBookSnapshot {
            market_id: self.market_id,
            outcome_index: self.outcome_index,
            bids,
            asks,
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            last_trade_price: self.last_trade_price,
        }
    }
}
