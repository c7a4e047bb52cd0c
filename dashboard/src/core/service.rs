//! # Service Traits
//!
//! Traits for dependency injection, so the query layer and background tasks
//! can run against a stub instead of the live API.

use crate::core::error::Result;
use async_trait::async_trait;
use shared::{Coin, GlobalMarket, PricePoint};

/// Read-only access to the upstream market-data API.
///
/// Every method returns data that already passed schema validation.
#[async_trait]
pub trait MarketDataService: Send + Sync {
    /// All tracked coins with current metrics, ids unique.
    async fn get_coins(&self) -> Result<Vec<Coin>>;

    /// Global aggregate market statistics.
    async fn get_global_market(&self) -> Result<GlobalMarket>;

    /// Time-ordered price history of one coin over the configured lookback.
    async fn get_price_series(&self, coin_id: &str) -> Result<Vec<PricePoint>>;
}
