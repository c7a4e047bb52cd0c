use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency key used when a mapping has no entry for the requested currency.
pub const FALLBACK_CURRENCY: &str = "usd";

/// One tracked cryptocurrency and its current market metrics.
///
/// Produced fresh on every successful coin-list fetch and never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Icon URL, empty when the upstream has none
    pub image: String,
    pub current_price: f64,
    pub price_change_percentage_24h: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_24h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_24h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_volume: Option<f64>,
    pub market_cap: f64,
    /// Positive when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap_rank: Option<u32>,
}

/// Aggregate statistics across all tracked coins.
///
/// Every field is optional upstream; absent counts are zero and absent mappings
/// are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GlobalMarket {
    pub active_cryptocurrencies: u64,
    pub markets: u64,
    /// Currency code -> total market cap
    pub total_market_cap: BTreeMap<String, f64>,
    /// Currency code -> total 24h volume
    pub total_volume: BTreeMap<String, f64>,
    /// Coin symbol -> share of total market cap, in percent
    pub market_cap_percentage: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap_change_percentage_24h_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    /// Keys the dashboard does not understand, kept for forward compatibility
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An amount together with the currency it is denominated in.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyAmount {
    pub currency: String,
    pub amount: f64,
}

impl GlobalMarket {
    /// Total market cap in `currency`, falling back to USD, then zero.
    pub fn market_cap_in(&self, currency: &str) -> CurrencyAmount {
        lookup_currency(&self.total_market_cap, currency)
    }

    /// Total 24h volume in `currency`, falling back to USD, then zero.
    pub fn volume_in(&self, currency: &str) -> CurrencyAmount {
        lookup_currency(&self.total_volume, currency)
    }

    /// Market-cap share of `symbol` in percent (zero when unknown).
    pub fn dominance(&self, symbol: &str) -> f64 {
        self.market_cap_percentage
            .get(&symbol.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }
}

fn lookup_currency(map: &BTreeMap<String, f64>, currency: &str) -> CurrencyAmount {
    let requested = currency.to_lowercase();
    let found = [requested.as_str(), FALLBACK_CURRENCY]
        .into_iter()
        .find_map(|code| {
            map.get(code).map(|amount| CurrencyAmount {
                currency: code.to_string(),
                amount: *amount,
            })
        });
    found.unwrap_or(CurrencyAmount {
        currency: requested,
        amount: 0.0,
    })
}

/// One (timestamp, price) sample of a coin's history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
