//! # Chart Handlers

use crate::app::chart::{ChartWindow, SeriesRequest};
use crate::app::state::AppState;
use parking_lot::RwLock;
use shared::PricePoint;
use std::sync::Arc;

/// Select a coin for the chart, showing `cached` while it refreshes.
///
/// Internal handler function - use [`crate::app::App::select_coin`] instead.
pub(crate) fn handle_coin_select(
    state: Arc<RwLock<AppState>>,
    coin_id: &str,
    cached: Option<Arc<Vec<PricePoint>>>,
) -> Option<SeriesRequest> {
    let from_cache = cached.is_some();
    let request = state.write().chart.select_coin_cached(coin_id, cached);
    if request.is_some() {
        tracing::info!(coin_id, from_cache, "Chart coin selected");
    }
    request
}

/// Change the chart window. Never fetches.
pub(crate) fn handle_window_change(state: Arc<RwLock<AppState>>, window: ChartWindow) {
    state.write().chart.set_window(window);
}
