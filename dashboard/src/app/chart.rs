//! # Price Chart State
//!
//! Explicit state machine behind the price-history card.
//!
//! ```text
//!             coins loaded / select(id)              series(id) ok
//!  NoCoin ─────────────────────────────► Loading ───────────────────► Ready
//!                                          │  ▲                         │
//!                          series(id) err  │  └──── select(other id) ───┤
//!                                          ▼                            │
//!                                        Failed ◄───────────────────────┘
//! ```
//!
//! There is no request cancellation. Every series response carries the coin
//! id it was requested for, and [`ChartState::apply_series`] drops responses
//! for a coin that is no longer selected. Changing the time window is a pure
//! reslice of the series already held and never asks for a fetch.

use crate::core::error::AppError;
use shared::{Coin, PricePoint};
use std::sync::Arc;

/// Selectable trailing window, in daily points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartWindow {
    #[default]
    SevenDays,
    FifteenDays,
    ThirtyDays,
}

impl ChartWindow {
    pub fn all() -> [ChartWindow; 3] {
        [
            ChartWindow::SevenDays,
            ChartWindow::FifteenDays,
            ChartWindow::ThirtyDays,
        ]
    }

    /// Number of trailing points shown.
    pub fn points(&self) -> usize {
        match self {
            ChartWindow::SevenDays => 7,
            ChartWindow::FifteenDays => 15,
            ChartWindow::ThirtyDays => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartWindow::SevenDays => "7D",
            ChartWindow::FifteenDays => "15D",
            ChartWindow::ThirtyDays => "30D",
        }
    }
}

/// Series fetch the chart wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub coin_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartPhase {
    NoCoin,
    Loading {
        coin_id: String,
    },
    Ready {
        coin_id: String,
        series: Arc<Vec<PricePoint>>,
    },
    Failed {
        coin_id: String,
        error: AppError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    phase: ChartPhase,
    window: ChartWindow,
}

impl Default for ChartState {
    fn default() -> Self {
        Self {
            phase: ChartPhase::NoCoin,
            window: ChartWindow::default(),
        }
    }
}

impl ChartState {
    pub fn phase(&self) -> &ChartPhase {
        &self.phase
    }

    pub fn window(&self) -> ChartWindow {
        self.window
    }

    /// Currently selected coin id, if any.
    pub fn selected(&self) -> Option<&str> {
        match &self.phase {
            ChartPhase::NoCoin => None,
            ChartPhase::Loading { coin_id }
            | ChartPhase::Ready { coin_id, .. }
            | ChartPhase::Failed { coin_id, .. } => Some(coin_id),
        }
    }

    /// Default to the first coin once the list arrives.
    ///
    /// Does nothing when a coin is already selected.
    pub fn on_coins_loaded(&mut self, coins: &[Coin]) -> Option<SeriesRequest> {
        if self.selected().is_some() {
            return None;
        }
        let first = coins.first()?;
        self.select_coin(&first.id)
    }

    /// Select `coin_id`; yields a request unless it is already selected.
    ///
    /// Selecting a different coin moves straight to `Loading`, so a late
    /// response for the previous coin can no longer be applied.
    pub fn select_coin(&mut self, coin_id: &str) -> Option<SeriesRequest> {
        self.select_coin_cached(coin_id, None)
    }

    /// Like [`ChartState::select_coin`], but a series already held in the
    /// cache is shown right away instead of the loading state. The request is
    /// still yielded so a stale series gets refreshed.
    pub fn select_coin_cached(
        &mut self,
        coin_id: &str,
        cached: Option<Arc<Vec<PricePoint>>>,
    ) -> Option<SeriesRequest> {
        if self.selected() == Some(coin_id) {
            return None;
        }
        let coin_id = coin_id.to_string();
        self.phase = match cached {
            Some(series) => ChartPhase::Ready {
                coin_id: coin_id.clone(),
                series,
            },
            None => ChartPhase::Loading {
                coin_id: coin_id.clone(),
            },
        };
        Some(SeriesRequest { coin_id })
    }

    /// Change the visible window. Never triggers a fetch.
    pub fn set_window(&mut self, window: ChartWindow) {
        self.window = window;
    }

    /// Apply a series response for `coin_id`.
    ///
    /// Returns `false` and leaves the state untouched when `coin_id` is not the
    /// selected coin.
    pub fn apply_series(
        &mut self,
        coin_id: &str,
        result: Result<Arc<Vec<PricePoint>>, AppError>,
    ) -> bool {
        if self.selected() != Some(coin_id) {
            return false;
        }

        self.phase = match result {
            Ok(series) => ChartPhase::Ready {
                coin_id: coin_id.to_string(),
                series,
            },
            Err(error) => match &self.phase {
                // a failed background refresh keeps the series on screen
                ChartPhase::Ready { .. } => return true,
                _ => ChartPhase::Failed {
                    coin_id: coin_id.to_string(),
                    error,
                },
            },
        };
        true
    }

    /// Trailing `min(window, len)` points of the ready series.
    pub fn visible_points(&self) -> &[PricePoint] {
        match &self.phase {
            ChartPhase::Ready { series, .. } => {
                let start = series.len().saturating_sub(self.window.points());
                &series[start..]
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view_models::tests::coin;
    use chrono::{Duration, TimeZone, Utc};

    fn series(days: usize, base: f64) -> Arc<Vec<PricePoint>> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Arc::new(
            (0..days)
                .map(|d| PricePoint {
                    timestamp: start + Duration::days(d as i64),
                    price: base + d as f64,
                })
                .collect(),
        )
    }

    // ========== Selection Tests ==========

    #[test]
    fn test_initial_state() {
        let chart = ChartState::default();
        assert_eq!(chart.phase(), &ChartPhase::NoCoin);
        assert_eq!(chart.window(), ChartWindow::SevenDays);
        assert!(chart.visible_points().is_empty());
    }

    #[test]
    fn test_first_coin_becomes_default() {
        let mut chart = ChartState::default();
        let coins = vec![coin("bitcoin", "Bitcoin", 1, 1.0, 0.0), coin("ethereum", "Ethereum", 2, 1.0, 0.0)];

        assert_eq!(chart.on_coins_loaded(&[]), None);
        let request = chart.on_coins_loaded(&coins);
        assert_eq!(request, Some(SeriesRequest { coin_id: "bitcoin".into() }));
        assert_eq!(chart.selected(), Some("bitcoin"));

        // a refetched list does not override the selection
        chart.select_coin("ethereum");
        assert_eq!(chart.on_coins_loaded(&coins), None);
        assert_eq!(chart.selected(), Some("ethereum"));
    }

    #[test]
    fn test_reselecting_same_coin_is_noop() {
        let mut chart = ChartState::default();
        chart.select_coin("bitcoin");
        chart.apply_series("bitcoin", Ok(series(30, 100.0)));

        assert_eq!(chart.select_coin("bitcoin"), None);
        assert!(matches!(chart.phase(), ChartPhase::Ready { .. }));
    }

    #[test]
    fn test_cached_series_shown_on_reselect() {
        let mut chart = ChartState::default();
        chart.select_coin("bitcoin");
        chart.apply_series("bitcoin", Ok(series(30, 100.0)));
        chart.select_coin("ethereum");

        let request = chart.select_coin_cached("bitcoin", Some(series(30, 100.0)));

        assert_eq!(request, Some(SeriesRequest { coin_id: "bitcoin".into() }));
        assert!(matches!(chart.phase(), ChartPhase::Ready { coin_id, .. } if coin_id == "bitcoin"));
        assert_eq!(chart.visible_points().len(), 7);

        // a failed refresh keeps the cached series on screen
        chart.apply_series("bitcoin", Err(AppError::Network("offline".into())));
        assert_eq!(chart.visible_points().len(), 7);
    }

    #[test]
    fn test_uncached_select_loads() {
        let mut chart = ChartState::default();
        chart.select_coin_cached("bitcoin", None);
        assert_eq!(chart.phase(), &ChartPhase::Loading { coin_id: "bitcoin".into() });
    }

    // ========== Ordering Tests ==========

    #[test]
    fn test_late_response_for_previous_coin_discarded() {
        let mut chart = ChartState::default();
        chart.select_coin("coin-a");
        chart.select_coin("coin-b");

        // B answers first, then A's slow response arrives
        assert!(chart.apply_series("coin-b", Ok(series(30, 200.0))));
        assert!(!chart.apply_series("coin-a", Ok(series(30, 100.0))));

        match chart.phase() {
            ChartPhase::Ready { coin_id, series } => {
                assert_eq!(coin_id, "coin-b");
                assert_eq!(series[0].price, 200.0);
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[test]
    fn test_late_error_for_previous_coin_discarded() {
        let mut chart = ChartState::default();
        chart.select_coin("coin-a");
        chart.select_coin("coin-b");

        assert!(!chart.apply_series("coin-a", Err(AppError::Network("timeout".into()))));
        assert_eq!(chart.phase(), &ChartPhase::Loading { coin_id: "coin-b".into() });
    }

    #[test]
    fn test_error_then_ready() {
        let mut chart = ChartState::default();
        chart.select_coin("bitcoin");
        chart.apply_series("bitcoin", Err(AppError::Http { status: 500, message: "down".into() }));
        assert!(matches!(chart.phase(), ChartPhase::Failed { .. }));

        chart.apply_series("bitcoin", Ok(series(5, 1.0)));
        assert_eq!(chart.visible_points().len(), 5);
    }

    #[test]
    fn test_refresh_error_keeps_series() {
        let mut chart = ChartState::default();
        chart.select_coin("bitcoin");
        chart.apply_series("bitcoin", Ok(series(30, 1.0)));
        chart.apply_series("bitcoin", Err(AppError::Network("offline".into())));

        assert!(matches!(chart.phase(), ChartPhase::Ready { .. }));
    }

    // ========== Window Tests ==========

    #[test]
    fn test_window_reslices_trailing_points() {
        let mut chart = ChartState::default();
        chart.select_coin("bitcoin");
        chart.apply_series("bitcoin", Ok(series(30, 100.0)));

        let expected = [(ChartWindow::SevenDays, 7), (ChartWindow::FifteenDays, 15), (ChartWindow::ThirtyDays, 30)];
        for (window, len) in expected {
            chart.set_window(window);
            let points = chart.visible_points();
            assert_eq!(points.len(), len);
            assert_eq!(points.last().unwrap().price, 129.0);
        }
    }

    #[test]
    fn test_short_history_shrinks_slice() {
        let mut chart = ChartState::default();
        chart.select_coin("newcoin");
        chart.apply_series("newcoin", Ok(series(4, 1.0)));
        chart.set_window(ChartWindow::FifteenDays);

        assert_eq!(chart.visible_points().len(), 4);
    }

    #[test]
    fn test_window_labels() {
        let labels: Vec<_> = ChartWindow::all().iter().map(|w| w.label()).collect();
        assert_eq!(labels, vec!["7D", "15D", "30D"]);
    }
}
