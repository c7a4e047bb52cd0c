//! # Market Queries
//!
//! One [`QueryCache`] per data kind, plus the fetch accessors that bind each
//! cache to its [`MarketDataService`] call. Like [`QueryCache::fetch`], the
//! accessors register the request immediately and return a `'static` future
//! that can be handed to `tokio::spawn`.
//!
//! | kind          | key        | stale time (default) |
//! |---------------|------------|----------------------|
//! | coin list     | `()`       | 60 s                 |
//! | global market | `()`       | 5 min                |
//! | price series  | coin id    | 5 min                |

use crate::core::config::DashboardConfig;
use crate::core::error::Result;
use crate::core::service::MarketDataService;
use crate::services::query_cache::{QueryCache, QuerySnapshot};
use shared::{Coin, GlobalMarket, PricePoint};
use std::future::Future;
use std::sync::Arc;

#[derive(Clone)]
pub struct MarketQueries {
    pub coins: QueryCache<(), Vec<Coin>>,
    pub global: QueryCache<(), GlobalMarket>,
    pub series: QueryCache<String, Vec<PricePoint>>,
}

impl MarketQueries {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            coins: QueryCache::new("allcryptos", config.coins_stale_time()),
            global: QueryCache::new("globalMarket", config.global_stale_time()),
            series: QueryCache::new("priceSeries", config.series_stale_time()),
        }
    }

    pub fn fetch_coins(
        &self,
        api: Arc<dyn MarketDataService>,
    ) -> impl Future<Output = Result<Arc<Vec<Coin>>>> + Send + 'static {
        self.coins
            .fetch((), move || async move { api.get_coins().await })
    }

    pub fn fetch_global(
        &self,
        api: Arc<dyn MarketDataService>,
    ) -> impl Future<Output = Result<Arc<GlobalMarket>>> + Send + 'static {
        self.global
            .fetch((), move || async move { api.get_global_market().await })
    }

    pub fn fetch_series(
        &self,
        api: Arc<dyn MarketDataService>,
        coin_id: String,
    ) -> impl Future<Output = Result<Arc<Vec<PricePoint>>>> + Send + 'static {
        let id = coin_id.clone();
        self.series
            .fetch(coin_id, move || async move { api.get_price_series(&id).await })
    }

    pub fn coins_snapshot(&self) -> QuerySnapshot<Vec<Coin>> {
        self.coins.snapshot(&())
    }

    pub fn global_snapshot(&self) -> QuerySnapshot<GlobalMarket> {
        self.global.snapshot(&())
    }

    pub fn series_snapshot(&self, coin_id: &str) -> QuerySnapshot<Vec<PricePoint>> {
        self.series.snapshot(&coin_id.to_string())
    }

    /// Mark every kind stale (manual refresh).
    pub fn invalidate_all(&self, selected_coin: Option<&str>) {
        self.coins.invalidate(&());
        self.global.invalidate(&());
        if let Some(id) = selected_coin {
            self.series.invalidate(&id.to_string());
        }
    }
}
