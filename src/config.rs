// ============================================================================
// Engine Configuration
// Engine-wide tunables, mirroring the teacher's `OrderBookConfig`/
// `MatchingEngineBuilder` shape (spec §3, §9 ambient stack)
// ============================================================================

use crate::numeric::Decimal;

/// Engine-wide tunables. Construct via [`EngineConfigBuilder`] or
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Default liquidity parameter `b` for newly created LMSR-backed books.
    pub default_liquidity_b: Decimal,
    /// Number of price levels returned per side in an `OrderBookSnapshot`.
    pub snapshot_depth: usize,
    /// Pub/sub channel name for `ORDER_BOOK_UPDATE` events.
    pub order_book_update_channel: String,
    /// Pub/sub channel name for `MARKET_UPDATES` events.
    pub market_updates_channel: String,
    /// Pub/sub channel name for `TRADES` events.
    pub trades_channel: String,
    /// Name of the background persistence work queue.
    pub persistence_queue_name: String,
    /// Retention hint passed through to the persistence worker.
    pub persistence_remove_on_complete: usize,
    /// Whether the per-book queue cooperatively yields between successive
    /// orders. Disable only for tests that want synchronous, deterministic
    /// drain behavior; always `true` in production.
    pub cooperative_yield: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfigBuilder::new().build()
    }
}

/// Builder for [`EngineConfig`], mirroring the teacher's
/// `MatchingEngineBuilder` fluent style.
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    default_liquidity_b: Decimal,
    snapshot_depth: usize,
    order_book_update_channel: String,
    market_updates_channel: String,
    trades_channel: String,
    persistence_queue_name: String,
    persistence_remove_on_complete: usize,
    cooperative_yield: bool,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            default_liquidity_b: Decimal::from(100u32),
            snapshot_depth: 25,
            order_book_update_channel: "order-book-update".to_string(),
            market_updates_channel: "market-updates".to_string(),
            trades_channel: "trades".to_string(),
            persistence_queue_name: "matching-engine-trades".to_string(),
            persistence_remove_on_complete: 1000,
            cooperative_yield: true,
        }
    }

    pub fn default_liquidity_b(mut self, b: Decimal) -> Self {
        self.default_liquidity_b = b;
        self
    }

    pub fn snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    pub fn order_book_update_channel(mut self, name: impl Into<String>) -> Self {
        self.order_book_update_channel = name.into();
        self
    }

    pub fn market_updates_channel(mut self, name: impl Into<String>) -> Self {
        self.market_updates_channel = name.into();
        self
    }

    pub fn trades_channel(mut self, name: impl Into<String>) -> Self {
        self.trades_channel = name.into();
        self
    }

    pub fn persistence_queue_name(mut self, name: impl Into<String>) -> Self {
        self.persistence_queue_name = name.into();
        self
    }

    pub fn persistence_remove_on_complete(mut self, count: usize) -> Self {
        self.persistence_remove_on_complete = count;
        self
    }

    pub fn cooperative_yield(mut self, enabled: bool) -> Self {
        self.cooperative_yield = enabled;
        self
    }

    pub fn build(self) -> EngineConfig {
        EngineConfig {
            default_liquidity_b: self.default_liquidity_b,
            snapshot_depth: self.snapshot_depth,
            order_book_update_channel: self.order_book_update_channel,
            market_updates_channel: self.market_updates_channel,
            trades_channel: self.trades_channel,
            persistence_queue_name: self.persistence_queue_name,
            persistence_remove_on_complete: self.persistence_remove_on_complete,
            cooperative_yield: self.cooperative_yield,
        }
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.snapshot_depth, 25);
        assert_eq!(config.trades_channel, "trades");
        assert!(config.cooperative_yield);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfigBuilder::new()
            .snapshot_depth(10)
            .trades_channel("custom-trades")
            .cooperative_yield(false)
            .build();

        assert_eq!(config.snapshot_depth, 10);
        assert_eq!(config.trades_channel, "custom-trades");
        assert!(!config.cooperative_yield);
    }
}
