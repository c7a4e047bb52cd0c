//! # Market Data Tasks
//!
//! Run a query through its cache and report the settled result. Concurrent
//! calls for the same key share one request inside the cache.

use crate::app::events::AppEvent;
use crate::app::tasks::TaskContext;
use tokio::spawn;
use tracing::{error, info};

/// Fetch the coin list
///
/// Internal task function - use [`crate::app::App::refresh`] instead.
pub(crate) fn fetch_coins(ctx: &TaskContext) {
    let pending = ctx.queries.fetch_coins(ctx.api.clone());
    let ctx = ctx.clone();
    spawn(async move {
        let result = pending.await;
        match &result {
            Ok(coins) => info!(count = coins.len(), "Coin list ready"),
            Err(e) => error!(error = %e, "Coin list fetch failed"),
        }
        ctx.send(AppEvent::CoinsResult(result)).await;
    });
}

/// Fetch the global market summary
pub(crate) fn fetch_global(ctx: &TaskContext) {
    let pending = ctx.queries.fetch_global(ctx.api.clone());
    let ctx = ctx.clone();
    spawn(async move {
        let result = pending.await;
        if let Err(e) = &result {
            error!(error = %e, "Global market fetch failed");
        }
        ctx.send(AppEvent::GlobalResult(result)).await;
    });
}

/// Fetch the price series of `coin_id`
///
/// The result is tagged with `coin_id` so the chart can drop it if the
/// selection moved on while the request was in flight.
pub(crate) fn fetch_series(ctx: &TaskContext, coin_id: String) {
    let pending = ctx.queries.fetch_series(ctx.api.clone(), coin_id.clone());
    let ctx = ctx.clone();
    spawn(async move {
        let result = pending.await;
        match &result {
            Ok(series) => info!(coin_id = %coin_id, points = series.len(), "Price series ready"),
            Err(e) => error!(coin_id = %coin_id, error = %e, "Price series fetch failed"),
        }
        ctx.send(AppEvent::SeriesResult { coin_id, result }).await;
    });
}
