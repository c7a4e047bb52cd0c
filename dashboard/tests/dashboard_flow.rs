//! End-to-end flows through [`App`] with an in-memory market-data service.

use async_trait::async_trait;
use dashboard::app::view_models::{to_overview_cards, OverviewKind};
use dashboard::core::{DashboardConfig, MarketDataService, Result};
use dashboard::App;
use shared::{Coin, GlobalMarket, PricePoint};
use std::sync::Arc;

struct FixedMarket {
    coins: Vec<Coin>,
    global: GlobalMarket,
}

#[async_trait]
impl MarketDataService for FixedMarket {
    async fn get_coins(&self) -> Result<Vec<Coin>> {
        Ok(self.coins.clone())
    }

    async fn get_global_market(&self) -> Result<GlobalMarket> {
        Ok(self.global.clone())
    }

    async fn get_price_series(&self, _coin_id: &str) -> Result<Vec<PricePoint>> {
        Ok(Vec::new())
    }
}

const NAMES: [&str; 12] = [
    "Bitcoin", "Ethereum", "Tether", "Solana", "Cardano", "Ripple", "Dogecoin", "Polkadot",
    "Nova Gold", "Nova Silver", "Chainlink", "Litecoin",
];

fn market() -> FixedMarket {
    let coins = NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Coin {
            id: name.to_lowercase().replace(' ', "-"),
            symbol: name[..3].to_lowercase(),
            name: name.to_string(),
            image: String::new(),
            current_price: 1000.0 / (i + 1) as f64,
            price_change_percentage_24h: if i % 2 == 0 { 1.5 } else { -0.75 },
            high_24h: None,
            low_24h: None,
            total_volume: Some(1_000_000.0),
            market_cap: 1e12 / (i + 1) as f64,
            market_cap_rank: Some(i as u32 + 1),
        })
        .collect();

    let mut global = GlobalMarket::default();
    global
        .total_market_cap
        .insert("usd".to_string(), 2_500_000_000_000.0);
    global
        .market_cap_percentage
        .insert("btc".to_string(), 51.234);

    FixedMarket { coins, global }
}

/// Apply task results until both the coin list and the global snapshot are cached.
async fn load(app: &mut App) {
    while app.queries().coins_snapshot().data.is_none()
        || app.queries().global_snapshot().data.is_none()
    {
        let event = app.event_rx.recv().await.unwrap();
        app.handle_event(event);
    }
}

fn visible_ranks(app: &App) -> (Vec<u32>, usize) {
    let rows = app.table_rows().unwrap();
    let mut state = app.state.write();
    let view = state.table.view(&rows);
    let ranks = view.rows.iter().filter_map(|r| r.market_rank).collect();
    (ranks, view.page_count)
}

// ========== Table Flow Tests ==========

#[tokio::test]
async fn test_table_pages_and_filter() {
    let mut app = App::with_service(Arc::new(market()), &DashboardConfig::default());
    load(&mut app).await;

    app.open_table_dialog();
    assert!(app.state.read().shell.is_table_dialog_open());

    let (ranks, page_count) = visible_ranks(&app);
    assert_eq!(ranks, (1..=8).collect::<Vec<_>>());
    assert_eq!(page_count, 2);

    app.set_table_page(2);
    let (ranks, _) = visible_ranks(&app);
    assert_eq!(ranks, vec![9, 10, 11, 12]);

    app.set_table_filter("nova".to_string());
    let (ranks, page_count) = visible_ranks(&app);
    assert_eq!(ranks, vec![9, 10]);
    assert_eq!(page_count, 1);
    assert_eq!(app.state.read().table.page(), 1);
}

#[tokio::test]
async fn test_closing_dialog_resets_search() {
    let mut app = App::with_service(Arc::new(market()), &DashboardConfig::default());
    load(&mut app).await;

    app.search_input("nova".to_string());
    app.open_table_from_search();
    assert_eq!(visible_ranks(&app).0, vec![9, 10]);

    app.close_table_dialog();
    app.open_table_dialog();

    let state = app.state.read();
    assert_eq!(state.shell.search(), "");
    assert_eq!(state.table.filter(), "");
}

#[tokio::test]
async fn test_export_follows_filter_across_pages() {
    let mut app = App::with_service(Arc::new(market()), &DashboardConfig::default());
    load(&mut app).await;

    app.open_table_dialog();
    let csv = app.export_csv_contents().unwrap();
    assert_eq!(csv.lines().count(), 1 + NAMES.len());

    app.set_table_filter("nova".to_string());
    let csv = app.export_csv_contents().unwrap();
    let names: Vec<_> = csv
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .collect();
    assert_eq!(names, vec!["Nova Gold", "Nova Silver"]);
}

// ========== Overview Flow Tests ==========

#[tokio::test]
async fn test_overview_cards_from_global_snapshot() {
    let config = DashboardConfig::default();
    let mut app = App::with_service(Arc::new(market()), &config);
    load(&mut app).await;

    let global = app.queries().global_snapshot().data.unwrap();
    let cards = to_overview_cards(&global, &app.currency());

    let market_cap = cards
        .iter()
        .find(|c| c.kind == OverviewKind::MarketCap)
        .unwrap();
    assert!(market_cap.value.ends_with("2.5T"), "got {}", market_cap.value);

    let dominance = cards
        .iter()
        .find(|c| c.kind == OverviewKind::BtcDominance)
        .unwrap();
    assert_eq!(dominance.value, "51.23%");
}
