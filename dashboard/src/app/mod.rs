//! # Application Orchestrator
//!
//! The main [`App`] struct coordinates the egui rendering layer, the async
//! tasks that fill the query caches, and the UI state machines.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Main Thread (egui)                       │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App (orchestrator)                                  │   │
//! │  │  - on_tick() - drain events, trigger refetches       │   │
//! │  │  - select_coin() / toggle_sort() / ... user actions  │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  State: Arc<RwLock<AppState>>                        │   │
//! │  │  Queries: MarketQueries (one QueryCache per kind)    │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │              Async Task Threads (Tokio)                     │
//! │  - fetch_coins() / fetch_global() / fetch_series(id)        │
//! │  - write_csv()                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Panels read fetched data from cache snapshots and UI state from
//! [`AppState`]; neither is written by the render code directly.
//!
//! ```rust,no_run
//! use dashboard::app::App;
//! use dashboard::core::DashboardConfig;
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let _guard = runtime.enter();
//!
//! let mut app = App::new(DashboardConfig::default());
//! // In the egui update loop:
//! app.on_tick();
//! let coins = app.queries().coins_snapshot();
//! ```

pub mod chart;
mod event_handler;
mod events;
mod handlers;
pub mod shell;
mod state;
pub mod table;
mod tasks;
pub mod view_models;

pub use events::AppEvent;
pub use state::*;
pub use tasks::RepaintSignal;

use crate::app::chart::ChartWindow;
use crate::app::table::TableColumn;
use crate::app::view_models::TableRow;
use crate::core::config::DashboardConfig;
use crate::core::error::Result;
use crate::core::service::MarketDataService;
use crate::services::api::ApiClient;
use crate::services::MarketQueries;
use async_channel::{unbounded, Receiver};
use event_handler::AppEventHandler;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tasks::TaskContext;

pub struct App {
    /// Thread-safe shared UI state.
    ///
    /// Hold locks for the shortest possible time; the render pass takes
    /// a read lock per panel.
    pub state: Arc<RwLock<AppState>>,

    /// Results from async tasks, polled in `on_tick()` with `try_recv()`.
    pub event_rx: Receiver<AppEvent>,

    tasks: TaskContext,
    queries: MarketQueries,
}

impl App {
    /// Create the app against the configured market-data API and start the
    /// initial coin list and global market fetches.
    ///
    /// Must be called from within a Tokio runtime context.
    pub fn new(config: DashboardConfig) -> Self {
        let api: Arc<dyn MarketDataService> = Arc::new(ApiClient::new(&config));
        Self::with_service(api, &config)
    }

    /// Create the app on top of any [`MarketDataService`].
    pub fn with_service(api: Arc<dyn MarketDataService>, config: &DashboardConfig) -> Self {
        let (event_tx, event_rx) = unbounded();
        let queries = MarketQueries::new(config);

        let app = App {
            state: Arc::new(RwLock::new(AppState::new(config.vs_currency.clone()))),
            event_rx,
            tasks: TaskContext {
                api,
                queries: queries.clone(),
                event_tx,
                repaint: RepaintSignal::default(),
            },
            queries,
        };

        tasks::market::fetch_coins(&app.tasks);
        tasks::market::fetch_global(&app.tasks);
        tracing::info!(currency = %config.vs_currency, "App state initialized - initial fetches started");

        app
    }

    /// Let background tasks wake the UI once the window exists.
    pub fn attach_context(&self, ctx: &egui::Context) {
        self.tasks.repaint.attach(ctx);
    }

    pub fn queries(&self) -> &MarketQueries {
        &self.queries
    }

    pub fn currency(&self) -> String {
        self.state.read().currency.clone()
    }

    /// Called every frame: apply task results, commit the debounced search
    /// and refetch whatever went stale.
    ///
    /// Returns how long until the pending search edit commits, so the caller
    /// can schedule a repaint.
    pub fn on_tick(&mut self) -> Option<Duration> {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }

        let now = Instant::now();
        handlers::shell::poll_search(self.state.clone(), now);

        if self.queries.coins.needs_fetch(&()) {
            tasks::market::fetch_coins(&self.tasks);
        }
        if self.queries.global.needs_fetch(&()) {
            tasks::market::fetch_global(&self.tasks);
        }
        let selected = self.state.read().chart.selected().map(str::to_string);
        if let Some(coin_id) = selected {
            if self.queries.series.needs_fetch(&coin_id) {
                tasks::market::fetch_series(&self.tasks, coin_id);
            }
        }

        self.state.read().header_search.pending_delay(now)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_impl(event);
    }

    /// Manual refresh: mark every query stale and refetch now.
    pub fn refresh(&mut self) {
        let selected = self.state.read().chart.selected().map(str::to_string);
        self.queries.invalidate_all(selected.as_deref());
        tasks::market::fetch_coins(&self.tasks);
        tasks::market::fetch_global(&self.tasks);
        if let Some(coin_id) = selected {
            tasks::market::fetch_series(&self.tasks, coin_id);
        }
        self.state
            .write()
            .notify(NoticeLevel::Info, "Refreshing market data");
        tracing::info!("Manual refresh requested");
    }

    // ========== Chart ==========

    /// Chart `coin_id`; a cached series is shown at once and refreshed if stale.
    pub fn select_coin(&mut self, coin_id: &str) {
        let cached = self.queries.series_snapshot(coin_id).data;
        if let Some(request) = handlers::chart::handle_coin_select(self.state.clone(), coin_id, cached) {
            tasks::market::fetch_series(&self.tasks, request.coin_id);
        }
    }

    pub fn set_chart_window(&mut self, window: ChartWindow) {
        handlers::chart::handle_window_change(self.state.clone(), window);
    }

    // ========== Header / Shell ==========

    pub fn search_input(&mut self, text: String) {
        handlers::shell::handle_search_input(self.state.clone(), text, Instant::now());
    }

    /// Pick a coin from the header dropdown: chart it and clear the search.
    pub fn pick_search_match(&mut self, coin_id: &str) {
        self.select_coin(coin_id);
        handlers::shell::clear_search(self.state.clone());
    }

    pub fn open_table_from_search(&mut self) {
        handlers::shell::open_table_from_search(self.state.clone());
    }

    pub fn open_table_dialog(&mut self) {
        handlers::shell::open_table_dialog(self.state.clone());
    }

    pub fn close_table_dialog(&mut self) {
        handlers::shell::close_table_dialog(self.state.clone());
    }

    // ========== Table ==========

    pub fn set_table_filter(&mut self, term: String) {
        handlers::table::handle_filter_change(self.state.clone(), term);
    }

    pub fn toggle_sort(&mut self, column: TableColumn) {
        handlers::table::handle_sort_click(self.state.clone(), column);
    }

    pub fn set_table_page(&mut self, page: usize) {
        handlers::table::handle_page_change(self.state.clone(), page);
    }

    pub fn set_table_page_size(&mut self, size: usize) {
        if let Err(e) = handlers::table::handle_page_size_change(self.state.clone(), size) {
            tracing::warn!(size, error = %e, "Rejected page size");
            self.state.write().notify(NoticeLevel::Error, e.to_string());
        }
    }

    /// Table rows for the current coin list, or `None` before it loads.
    pub fn table_rows(&self) -> Option<Arc<Vec<TableRow>>> {
        let coins = self.queries.coins_snapshot().data?;
        let mut state = self.state.write();
        let currency = state.currency.clone();
        Some(state.table_rows.rows_for(&coins, &currency))
    }

    /// CSV of the currently filtered rows (all pages).
    pub fn export_csv_contents(&self) -> Result<String> {
        let rows = self.table_rows().unwrap_or_default();
        handlers::table::export_csv_contents(self.state.clone(), &rows)
    }

    /// Serialize the filtered rows and write them to `path` in the background.
    pub fn export_csv_to(&mut self, path: PathBuf) {
        match self.export_csv_contents() {
            Ok(contents) => tasks::export::write_csv(&self.tasks, path, contents),
            Err(e) => {
                tracing::error!(error = %e, "CSV serialization failed");
                self.state
                    .write()
                    .notify(NoticeLevel::Error, format!("Export failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::chart::ChartPhase;
    use crate::app::view_models::tests::coin;
    use crate::core::error::AppError;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use shared::{Coin, GlobalMarket, PricePoint};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubService {
        coins: Vec<Coin>,
        series_delay: HashMap<String, Duration>,
        coin_calls: AtomicUsize,
        series_calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MarketDataService for StubService {
        async fn get_coins(&self) -> Result<Vec<Coin>> {
            self.coin_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.coins.clone())
        }

        async fn get_global_market(&self) -> Result<GlobalMarket> {
            Ok(GlobalMarket::default())
        }

        async fn get_price_series(&self, coin_id: &str) -> Result<Vec<PricePoint>> {
            self.series_calls.lock().unwrap().push(coin_id.to_string());
            if let Some(delay) = self.series_delay.get(coin_id) {
                tokio::time::sleep(*delay).await;
            }
            if coin_id == "broken" {
                return Err(AppError::Http { status: 404, message: "not found".into() });
            }
            let base = if coin_id == "coin-a" { 100.0 } else { 200.0 };
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            Ok((0..30)
                .map(|d| PricePoint {
                    timestamp: start + chrono::Duration::days(d),
                    price: base + d as f64,
                })
                .collect())
        }
    }

    fn stub() -> StubService {
        StubService {
            coins: vec![
                coin("coin-a", "Coin A", 1, 10.0, 1.0),
                coin("coin-b", "Coin B", 2, 20.0, -1.0),
            ],
            ..Default::default()
        }
    }

    async fn next_event(app: &mut App) {
        let event = app.event_rx.recv().await.unwrap();
        app.handle_event(event);
    }

    /// Wait until the chart leaves `Loading`.
    async fn settle_chart(app: &mut App) {
        while matches!(app.state.read().chart.phase(), ChartPhase::Loading { .. } | ChartPhase::NoCoin) {
            next_event(app).await;
        }
    }

    // ========== Startup Tests ==========

    #[tokio::test]
    async fn test_first_coin_selected_after_load() {
        let api = Arc::new(stub());
        let mut app = App::with_service(api.clone(), &DashboardConfig::default());

        settle_chart(&mut app).await;

        let state = app.state.read();
        assert_eq!(state.chart.selected(), Some("coin-a"));
        assert_eq!(state.chart.visible_points().len(), 7);
        assert_eq!(api.coin_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_manual_refresh_refetches_and_notifies() {
        let api = Arc::new(stub());
        let mut app = App::with_service(api.clone(), &DashboardConfig::default());
        settle_chart(&mut app).await;
        app.state.write().take_notifications();

        app.refresh();
        let notices = app.state.write().take_notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);

        while api.coin_calls.load(Ordering::SeqCst) < 2 {
            next_event(&mut app).await;
        }
        assert!(app.queries().coins_snapshot().data.is_some());
    }

    // ========== Chart Tests ==========

    #[tokio::test]
    async fn test_window_change_does_not_fetch() {
        let api = Arc::new(stub());
        let mut app = App::with_service(api.clone(), &DashboardConfig::default());
        settle_chart(&mut app).await;
        let calls_before = api.series_calls.lock().unwrap().len();

        app.set_chart_window(ChartWindow::ThirtyDays);
        app.set_chart_window(ChartWindow::FifteenDays);
        app.on_tick();

        assert_eq!(api.series_calls.lock().unwrap().len(), calls_before);
        assert_eq!(app.state.read().chart.visible_points().len(), 15);
    }

    #[tokio::test]
    async fn test_slow_series_for_previous_coin_is_ignored() {
        let mut service = stub();
        service.coins.push(coin("coin-c", "Coin C", 3, 30.0, 0.0));
        service.series_delay.insert("coin-b".into(), Duration::from_millis(200));
        service.series_delay.insert("coin-c".into(), Duration::from_millis(5));
        let mut app = App::with_service(Arc::new(service), &DashboardConfig::default());
        settle_chart(&mut app).await;

        app.select_coin("coin-b");
        app.select_coin("coin-c");

        // coin-c answers first, the slow coin-b response arrives afterwards
        loop {
            let event = app.event_rx.recv().await.unwrap();
            let late = matches!(&event, AppEvent::SeriesResult { coin_id, .. } if coin_id == "coin-b");
            app.handle_event(event);
            if late {
                break;
            }
        }

        let state = app.state.read();
        assert_eq!(state.chart.selected(), Some("coin-c"));
        match state.chart.phase() {
            ChartPhase::Ready { coin_id, .. } => assert_eq!(coin_id, "coin-c"),
            other => panic!("unexpected phase {:?}", other),
        };
    }

    #[tokio::test]
    async fn test_reselecting_cached_coin_skips_loading() {
        let api = Arc::new(stub());
        let mut app = App::with_service(api.clone(), &DashboardConfig::default());
        settle_chart(&mut app).await;
        app.select_coin("coin-b");
        settle_chart(&mut app).await;

        app.select_coin("coin-a");

        {
            let state = app.state.read();
            assert!(matches!(state.chart.phase(), ChartPhase::Ready { coin_id, .. } if coin_id == "coin-a"));
            assert_eq!(state.chart.visible_points().len(), 7);
            assert_eq!(state.chart.visible_points()[0].price, 123.0);
        }
        // the cached series is still fresh, so no second request goes out
        next_event(&mut app).await;
        let calls = api.series_calls.lock().unwrap().clone();
        assert_eq!(calls.iter().filter(|id| *id == "coin-a").count(), 1);
    }

    #[tokio::test]
    async fn test_series_error_is_local_to_chart() {
        let mut service = stub();
        service.coins.insert(0, coin("broken", "Broken", 1, 1.0, 0.0));
        let mut app = App::with_service(Arc::new(service), &DashboardConfig::default());

        settle_chart(&mut app).await;

        assert!(matches!(app.state.read().chart.phase(), ChartPhase::Failed { .. }));
        assert!(app.queries().coins_snapshot().data.is_some());
    }

    // ========== Table Tests ==========

    #[tokio::test]
    async fn test_search_escalation_filters_table() {
        let mut app = App::with_service(Arc::new(stub()), &DashboardConfig::default());
        settle_chart(&mut app).await;

        app.search_input("coin b".into());
        app.open_table_from_search();

        let rows = app.table_rows().unwrap();
        let mut state = app.state.write();
        let view = state.table.view(&rows);
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.rows[0].name, "Coin B");
    }

    #[tokio::test]
    async fn test_export_contents_has_header_and_rows() {
        let mut app = App::with_service(Arc::new(stub()), &DashboardConfig::default());
        settle_chart(&mut app).await;

        let csv = app.export_csv_contents().unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("name,icon,price"));
    }

    #[tokio::test]
    async fn test_export_writes_file_and_notifies() {
        let mut app = App::with_service(Arc::new(stub()), &DashboardConfig::default());
        settle_chart(&mut app).await;
        let path = std::env::temp_dir().join(format!("flux-export-{}.csv", std::process::id()));

        app.export_csv_to(path.clone());
        loop {
            next_event(&mut app).await;
            if app.state.read().last_export.is_some() {
                break;
            }
        }

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
        let notices = app.state.write().take_notifications();
        assert!(notices.iter().any(|n| n.level == NoticeLevel::Success));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_invalid_page_size_notifies() {
        let mut app = App::with_service(Arc::new(stub()), &DashboardConfig::default());
        app.set_table_page_size(3);

        let notices = app.state.write().take_notifications();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }
}
