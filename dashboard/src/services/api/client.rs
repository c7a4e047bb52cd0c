//! # API Client
//!
//! HTTP client for the upstream market-data API.

use crate::core::config::DashboardConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::MarketDataService;
use reqwest::Client;
use serde_json::Value;
use shared::{Coin, GlobalMarket, PricePoint};
use std::time::{Duration, Instant};

/// Longest error-body excerpt kept in an [`AppError::Http`] message
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the market-data API.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections internally.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    pub(crate) vs_currency: String,
    pub(crate) coins_per_page: u32,
    pub(crate) history_days: u32,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ApiClient {
    /// Create a client from the dashboard configuration.
    pub fn new(config: &DashboardConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("crypto-flux/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            });

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
            coins_per_page: config.coins_per_page,
            history_days: config.history_days,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff(),
        }
    }

    /// Client with default settings against `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let config = DashboardConfig {
            api_base_url: base_url.into(),
            ..DashboardConfig::default()
        };
        Self::new(&config)
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}{path}` and decode the body as JSON, retrying retryable failures.
    pub(crate) async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut attempt = 0;
        loop {
            match self.get_json_once(path, query).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        path,
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json_once(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "Network error");
                AppError::Network(e.to_string())
            })?;

        let status = response.status();
        let duration = start.elapsed();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().chars().take(MAX_ERROR_BODY).collect()
            };
            tracing::warn!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                url = %url,
                "Request failed"
            );
            return Err(AppError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Response parse error");
            AppError::Decode(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl MarketDataService for ApiClient {
    async fn get_coins(&self) -> Result<Vec<Coin>> {
        crate::services::api::market::get_coins(self).await
    }

    async fn get_global_market(&self) -> Result<GlobalMarket> {
        crate::services::api::market::get_global_market(self).await
    }

    async fn get_price_series(&self, coin_id: &str) -> Result<Vec<PricePoint>> {
        crate::services::api::market::get_price_series(self, coin_id).await
    }
}
