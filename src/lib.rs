// ============================================================================
// Prediction Matching Engine
// LMSR pricing engine and per-market order-processing pipeline
// ============================================================================

//! # Prediction Matching Engine
//!
//! A deterministic LMSR (Logarithmic Market Scoring Rule) pricing engine
//! combined with a per-market, per-outcome serialized order-processing
//! pipeline: submitted orders become executed trades, update in-memory book
//! state, and publish events to downstream subscribers and a durable
//! trade-persistence channel.
//!
//! ## Example
//!
//! ```rust
//! use prediction_matching_engine::prelude::*;
//! use prediction_matching_engine::domain::{MarketId, OrderInput, OrderType, Side, UserRef};
//! use prediction_matching_engine::numeric::Decimal;
//! use std::str::FromStr;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::with_defaults();
//! let market_id = MarketId::new();
//!
//! let ask = OrderInput {
//!     market_id,
//!     outcome_index: 0,
//!     side: Side::Ask,
//!     order_type: OrderType::Limit,
//!     price: Some(Decimal::from_str("0.60")?),
//!     quantity: Decimal::from_str("10")?,
//!     submitter: UserRef::User("seller".to_string()),
//! };
//! engine.submit_order(ask).await?;
//!
//! let bid = OrderInput {
//!     market_id,
//!     outcome_index: 0,
//!     side: Side::Bid,
//!     order_type: OrderType::Limit,
//!     price: Some(Decimal::from_str("0.65")?),
//!     quantity: Decimal::from_str("4")?,
//!     submitter: UserRef::User("buyer".to_string()),
//! };
//! let processed = engine.submit_order(bid).await?;
//! assert_eq!(processed.trades.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod interfaces;
pub mod lmsr;
pub mod numeric;

pub mod prelude {
    pub use crate::config::{EngineConfig, EngineConfigBuilder};
    pub use crate::domain::{
        MarketId, OrderId, OrderInput, OrderResult, OrderStatus, OrderType, ProcessedOrder, Side,
        TradeId, UserRef,
    };
    pub use crate::engine::Engine;
    pub use crate::errors::EngineError;
    pub use crate::interfaces::{
        BroadcastEventPublisher, ContinuousDoubleAuction, EngineEvent, EventPublisher,
        LoggingEventPublisher, MatchingAlgorithm, NoOpEventPublisher, NoOpPersistenceSink,
        PersistenceSink,
    };
}
