//! # Market Data Endpoints
//!
//! The three read-only queries of the dashboard. Each decodes the body into a
//! raw JSON value and hands it to the matching validator in [`shared::validate`].

use super::client::ApiClient;
use crate::core::error::{AppError, Result};
use shared::validate::{validate_coin_list, validate_global_market, validate_price_series};
use shared::{Coin, GlobalMarket, PricePoint};

/// Fetch all tracked coins ordered by market cap.
#[tracing::instrument(skip(client), fields(currency = %client.vs_currency))]
pub async fn get_coins(client: &ApiClient) -> Result<Vec<Coin>> {
    let start = std::time::Instant::now();
    let query = [
        ("vs_currency", client.vs_currency.clone()),
        ("order", "market_cap_desc".to_string()),
        ("per_page", client.coins_per_page.to_string()),
        ("page", "1".to_string()),
        ("sparkline", "false".to_string()),
    ];

    let value = client.get_json("/coins/markets", &query).await?;
    let list = validate_coin_list(&value).map_err(|e| {
        tracing::error!(error = %e, "Coin list failed validation");
        AppError::from(e)
    })?;

    if !list.dropped_duplicates.is_empty() {
        tracing::warn!(
            duplicates = ?list.dropped_duplicates,
            "Dropped duplicate coin ids"
        );
    }
    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        coin_count = list.coins.len(),
        "Coins fetched successfully"
    );
    Ok(list.coins)
}

/// Fetch global aggregate market statistics.
#[tracing::instrument(skip(client))]
pub async fn get_global_market(client: &ApiClient) -> Result<GlobalMarket> {
    let start = std::time::Instant::now();

    let value = client.get_json("/global", &[]).await?;
    let global = validate_global_market(&value).map_err(|e| {
        tracing::error!(error = %e, "Global market snapshot failed validation");
        AppError::from(e)
    })?;

    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        active_cryptocurrencies = global.active_cryptocurrencies,
        "Global market fetched successfully"
    );
    Ok(global)
}

/// Fetch the price history of `coin_id` over the configured lookback window.
#[tracing::instrument(skip(client), fields(coin_id = %coin_id, days = client.history_days))]
pub async fn get_price_series(client: &ApiClient, coin_id: &str) -> Result<Vec<PricePoint>> {
    if !is_valid_coin_id(coin_id) {
        return Err(AppError::Validation(format!("Invalid coin id: {:?}", coin_id)));
    }

    let start = std::time::Instant::now();
    let path = format!("/coins/{}/market_chart", coin_id);
    let query = [
        ("vs_currency", client.vs_currency.clone()),
        ("days", client.history_days.to_string()),
        // one sample per day; ranges over 1 day are hourly otherwise
        ("interval", "daily".to_string()),
    ];

    let value = client.get_json(&path, &query).await?;
    let points = validate_price_series(&value).map_err(|e| {
        tracing::error!(error = %e, "Price series failed validation");
        AppError::from(e)
    })?;

    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        point_count = points.len(),
        "Price series fetched successfully"
    );
    Ok(points)
}

/// Coin ids are URL slugs (`bitcoin`, `usd-coin`, `wrapped-steth`).
fn is_valid_coin_id(coin_id: &str) -> bool {
    !coin_id.is_empty()
        && coin_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && coin_id != "."
        && coin_id != ".."
}
