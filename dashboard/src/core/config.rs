//! Dashboard runtime configuration from environment variables

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public CoinGecko v3 endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Runtime configuration of the HTTP client and query cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the market-data API, without trailing slash
    pub api_base_url: String,
    /// Currency all prices are quoted in (e.g. "inr")
    pub vs_currency: String,
    /// Number of coins requested for the coin list
    pub coins_per_page: u32,
    /// Lookback of the price history, in days
    pub history_days: u32,
    pub request_timeout_secs: u64,
    /// Extra attempts after a retryable failure
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub coins_stale_secs: u64,
    pub global_stale_secs: u64,
    pub series_stale_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            vs_currency: "inr".to_string(),
            coins_per_page: 100,
            history_days: 30,
            request_timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 500,
            coins_stale_secs: 60,
            global_stale_secs: 300,
            series_stale_secs: 300,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `FLUX_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable values are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let number = |key: &str, default: u64| -> u64 {
            match lookup(key) {
                None => default,
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    tracing::warn!(key, value = %raw, default, "Invalid config value, using default");
                    default
                }),
            }
        };
        let small = |key: &str, default: u32| -> u32 {
            u32::try_from(number(key, u64::from(default))).unwrap_or(default)
        };

        let api_base_url = lookup("FLUX_API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);
        let vs_currency = lookup("FLUX_VS_CURRENCY")
            .map(|cur| cur.trim().to_lowercase())
            .filter(|cur| !cur.is_empty())
            .unwrap_or(defaults.vs_currency);

        Self {
            api_base_url,
            vs_currency,
            coins_per_page: small("FLUX_COINS_PER_PAGE", defaults.coins_per_page).clamp(1, 250),
            history_days: small("FLUX_HISTORY_DAYS", defaults.history_days).max(1),
            request_timeout_secs: number("FLUX_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)
                .max(1),
            max_retries: small("FLUX_MAX_RETRIES", defaults.max_retries),
            retry_backoff_ms: number("FLUX_RETRY_BACKOFF_MS", defaults.retry_backoff_ms),
            coins_stale_secs: number("FLUX_COINS_STALE_SECS", defaults.coins_stale_secs),
            global_stale_secs: number("FLUX_GLOBAL_STALE_SECS", defaults.global_stale_secs),
            series_stale_secs: number("FLUX_SERIES_STALE_SECS", defaults.series_stale_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn coins_stale_time(&self) -> Duration {
        Duration::from_secs(self.coins_stale_secs)
    }

    pub fn global_stale_time(&self) -> Duration {
        Duration::from_secs(self.global_stale_secs)
    }

    pub fn series_stale_time(&self) -> Duration {
        Duration::from_secs(self.series_stale_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = DashboardConfig::from_lookup(lookup(&[]));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.coins_stale_time(), Duration::from_secs(60));
        assert_eq!(config.global_stale_time(), Duration::from_secs(300));
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("FLUX_API_BASE_URL", "http://localhost:8080/api/"),
            ("FLUX_VS_CURRENCY", " USD "),
            ("FLUX_HISTORY_DAYS", "90"),
            ("FLUX_MAX_RETRIES", "0"),
        ]));

        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.vs_currency, "usd");
        assert_eq!(config.history_days, 90);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("FLUX_REQUEST_TIMEOUT_SECS", "soon"),
            ("FLUX_COINS_PER_PAGE", "100000"),
            ("FLUX_VS_CURRENCY", ""),
        ]));

        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.coins_per_page, 250);
        assert_eq!(config.vs_currency, "inr");
    }
}
