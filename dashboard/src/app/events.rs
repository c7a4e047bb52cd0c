//! # Application Events
//!
//! Results sent from background tasks to the egui thread.

use crate::core::error::AppError;
use shared::{Coin, GlobalMarket, PricePoint};
use std::path::PathBuf;
use std::sync::Arc;

/// Async task results sent to main thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Coin list query settled
    CoinsResult(Result<Arc<Vec<Coin>>, AppError>),
    /// Global market query settled
    GlobalResult(Result<Arc<GlobalMarket>, AppError>),
    /// Price series query settled for `coin_id`
    SeriesResult {
        coin_id: String,
        result: Result<Arc<Vec<PricePoint>>, AppError>,
    },
    /// CSV file written (or not)
    ExportResult(Result<PathBuf, AppError>),
}
