//! # Event Handler
//!
//! Applies results from background tasks to the application state.
//!
//! The cache already holds fetched data; events only move the UI state
//! machines forward (default chart coin, chart phase, toasts).

use crate::app::events::AppEvent;
use crate::app::state::NoticeLevel;
use crate::app::{tasks, App};
use crate::core::error::AppError;
use shared::{Coin, GlobalMarket, PricePoint};
use std::path::PathBuf;
use std::sync::Arc;

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    /// Acquires the write lock per event, for the duration of the update only.
    fn handle_event_impl(&mut self, event: AppEvent) {
        match event {
            AppEvent::CoinsResult(result) => self.handle_coins_result(result),
            AppEvent::GlobalResult(result) => self.handle_global_result(result),
            AppEvent::SeriesResult { coin_id, result } => {
                self.handle_series_result(coin_id, result)
            }
            AppEvent::ExportResult(result) => self.handle_export_result(result),
        }
    }
}

impl App {
    fn handle_coins_result(&mut self, result: Result<Arc<Vec<Coin>>, AppError>) {
        match result {
            Ok(coins) => {
                let request = self.state.write().chart.on_coins_loaded(&coins);
                if let Some(request) = request {
                    tracing::info!(coin_id = %request.coin_id, "Default chart coin selected");
                    tasks::market::fetch_series(&self.tasks, request.coin_id);
                }
            }
            Err(e) => {
                let had_data = self.queries.coins_snapshot().data.is_some();
                if had_data {
                    self.state
                        .write()
                        .notify(NoticeLevel::Error, format!("Refreshing coins failed: {}", e));
                }
            }
        }
    }

    fn handle_global_result(&mut self, result: Result<Arc<GlobalMarket>, AppError>) {
        if let Ok(global) = result {
            tracing::debug!(
                active = global.active_cryptocurrencies,
                markets = global.markets,
                "Global market applied"
            );
        }
        // errors are rendered by the overview panel from the cache snapshot
    }

    fn handle_series_result(
        &mut self,
        coin_id: String,
        result: Result<Arc<Vec<PricePoint>>, AppError>,
    ) {
        let applied = self.state.write().chart.apply_series(&coin_id, result);
        if !applied {
            tracing::debug!(coin_id = %coin_id, "Discarded series for deselected coin");
        }
    }

    fn handle_export_result(&mut self, result: Result<PathBuf, AppError>) {
        let mut state = self.state.write();
        match result {
            Ok(path) => {
                state.notify(
                    NoticeLevel::Success,
                    format!("Exported to {}", path.display()),
                );
                state.last_export = Some(path);
            }
            Err(e) => state.notify(NoticeLevel::Error, format!("Export failed: {}", e)),
        }
    }
}
