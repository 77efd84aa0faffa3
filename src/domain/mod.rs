// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod errors;
pub mod ids;
pub mod order;
pub mod order_book;
pub mod trade;

pub use errors::OrderBookError;
pub use ids::{MarketId, OrderId, TradeId, UserRef};
pub use order::{OrderInput, OrderResult, OrderStatus, OrderType, RestingOrder, Side};
pub use order_book::{OrderBookSnapshot, OrderBookState, PriceLevel, ProcessedOrder, TradeVec};
pub use trade::ExecutedTrade;
