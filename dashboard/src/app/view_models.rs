//! # View Models
//!
//! Pure mapping from validated API data to the exact fields each panel shows.
//! Nothing here performs I/O or mutates its input; every function can be
//! called once per frame.
//!
//! Color and arrow direction always come from [`is_negative_change`] on the
//! numeric value, never from the first character of a formatted string.

use serde::Serialize;
use shared::utils::{
    format_compact, format_compact_currency, format_currency, format_integer, format_percent,
    format_signed_percent, is_negative_change, price_decimals,
};
use shared::{Coin, GlobalMarket, PricePoint};
use std::sync::Arc;

/// Precision of percentages in cards and tables
pub const PERCENT_DECIMALS: usize = 2;
/// Precision of the coin picker's change badge
pub const BADGE_DECIMALS: usize = 4;

/// Slice the first `n` items (fewer when the list is shorter).
pub fn top_n<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}

// ========== Coin Picker ==========

/// One entry of the searchable coin picker.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinOption {
    /// Coin id
    pub value: String,
    pub label: String,
    pub symbol: String,
    pub icon: String,
    pub price: String,
    /// Sign-prefixed, four decimals (`+1.2345%`)
    pub change: String,
    pub is_negative: bool,
}

pub fn to_combobox_option(coin: &Coin, currency: &str) -> CoinOption {
    CoinOption {
        value: coin.id.clone(),
        label: coin.name.clone(),
        symbol: coin.symbol.to_uppercase(),
        icon: coin.image.clone(),
        price: format_currency(coin.current_price, currency),
        change: format_signed_percent(coin.price_change_percentage_24h, BADGE_DECIMALS),
        is_negative: is_negative_change(coin.price_change_percentage_24h),
    }
}

// ========== Chart ==========

/// One plotted sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Unix seconds, used as the plot's x coordinate
    pub x: f64,
    /// `YYYY-MM-DD`
    pub date: String,
    pub price: f64,
}

pub fn to_chart_series(points: &[PricePoint]) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| {
            let factor = 10f64.powi(price_decimals(p.price) as i32);
            ChartPoint {
                x: p.timestamp.timestamp() as f64,
                date: p.timestamp.format("%Y-%m-%d").to_string(),
                price: (p.price * factor).round() / factor,
            }
        })
        .collect()
}

// ========== Market Table ==========

/// Column order of the CSV export; matches the serialized fields of [`TableRow`].
pub const TABLE_ROW_FIELDS: [&str; 9] = [
    "name",
    "icon",
    "price",
    "volume",
    "market_rank",
    "market_cap",
    "change_percentage",
    "high_24h",
    "low_24h",
];

/// Per-coin flattening used only by the market table.
///
/// Numeric fields drive sorting and the CSV export; [`RowDisplay`] holds the
/// pre-formatted strings for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub icon: String,
    pub price: f64,
    pub volume: Option<f64>,
    pub market_rank: Option<u32>,
    pub market_cap: f64,
    pub change_percentage: f64,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    #[serde(skip)]
    pub display: RowDisplay,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowDisplay {
    pub price: String,
    pub volume: String,
    pub market_rank: String,
    pub market_cap: String,
    pub change: String,
    pub high_24h: String,
    pub low_24h: String,
    pub is_negative: bool,
}

const MISSING: &str = "-";

pub fn to_table_row(coin: &Coin, currency: &str) -> TableRow {
    let money = |value: Option<f64>| {
        value
            .map(|v| format_currency(v, currency))
            .unwrap_or_else(|| MISSING.to_string())
    };

    TableRow {
        id: coin.id.clone(),
        name: coin.name.clone(),
        icon: coin.image.clone(),
        price: coin.current_price,
        volume: coin.total_volume,
        market_rank: coin.market_cap_rank,
        market_cap: coin.market_cap,
        change_percentage: coin.price_change_percentage_24h,
        high_24h: coin.high_24h,
        low_24h: coin.low_24h,
        display: RowDisplay {
            price: format_currency(coin.current_price, currency),
            volume: money(coin.total_volume),
            market_rank: coin
                .market_cap_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            market_cap: format_currency(coin.market_cap, currency),
            change: format_signed_percent(coin.price_change_percentage_24h, PERCENT_DECIMALS),
            high_24h: money(coin.high_24h),
            low_24h: money(coin.low_24h),
            is_negative: is_negative_change(coin.price_change_percentage_24h),
        },
    }
}

pub fn to_table_rows(coins: &[Coin], currency: &str) -> Vec<TableRow> {
    coins.iter().map(|c| to_table_row(c, currency)).collect()
}

/// Table rows recomputed only when the coin list snapshot changes.
#[derive(Debug, Default)]
pub struct TableRowsMemo {
    source: Option<Arc<Vec<Coin>>>,
    currency: String,
    rows: Arc<Vec<TableRow>>,
}

impl TableRowsMemo {
    pub fn rows_for(&mut self, coins: &Arc<Vec<Coin>>, currency: &str) -> Arc<Vec<TableRow>> {
        let unchanged = self
            .source
            .as_ref()
            .is_some_and(|source| Arc::ptr_eq(source, coins))
            && self.currency == currency;

        if !unchanged {
            self.rows = Arc::new(to_table_rows(coins, currency));
            self.source = Some(Arc::clone(coins));
            self.currency = currency.to_string();
        }
        Arc::clone(&self.rows)
    }
}

// ========== Price Strip ==========

/// Number of coins in the price strip
pub const PRICE_STRIP_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceCard {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub icon: String,
    pub price: String,
    pub change: String,
    pub is_negative: bool,
}

pub fn to_price_card(coin: &Coin, currency: &str) -> PriceCard {
    PriceCard {
        id: coin.id.clone(),
        name: coin.name.clone(),
        symbol: coin.symbol.to_uppercase(),
        icon: coin.image.clone(),
        price: format_currency(coin.current_price, currency),
        change: format_signed_percent(coin.price_change_percentage_24h, PERCENT_DECIMALS),
        is_negative: is_negative_change(coin.price_change_percentage_24h),
    }
}

pub fn to_price_cards(coins: &[Coin], currency: &str) -> Vec<PriceCard> {
    top_n(coins, PRICE_STRIP_LEN)
        .iter()
        .map(|c| to_price_card(c, currency))
        .collect()
}

// ========== Market Overview ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewKind {
    MarketCap,
    Volume,
    BtcDominance,
    ActiveCryptocurrencies,
}

impl OverviewKind {
    pub fn all() -> [OverviewKind; 4] {
        [
            OverviewKind::MarketCap,
            OverviewKind::Volume,
            OverviewKind::BtcDominance,
            OverviewKind::ActiveCryptocurrencies,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            OverviewKind::MarketCap => "Market Cap",
            OverviewKind::Volume => "24h Volume",
            OverviewKind::BtcDominance => "BTC Dominance",
            OverviewKind::ActiveCryptocurrencies => "Active Cryptocurrencies",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewCard {
    pub kind: OverviewKind,
    pub value: String,
    /// 24h change badge, market cap only
    pub change: Option<String>,
    pub is_negative: bool,
}

pub fn to_overview_card(kind: OverviewKind, global: &GlobalMarket, currency: &str) -> OverviewCard {
    let mut card = OverviewCard {
        kind,
        value: String::new(),
        change: None,
        is_negative: false,
    };

    match kind {
        OverviewKind::MarketCap => {
            let cap = global.market_cap_in(currency);
            card.value = format_compact_currency(cap.amount, &cap.currency);
            if let Some(change) = global.market_cap_change_percentage_24h_usd {
                card.change = Some(format_signed_percent(change, PERCENT_DECIMALS));
                card.is_negative = is_negative_change(change);
            }
        }
        OverviewKind::Volume => {
            let volume = global.volume_in(currency);
            card.value = format_compact_currency(volume.amount, &volume.currency);
        }
        OverviewKind::BtcDominance => {
            card.value = format_percent(global.dominance("btc"), PERCENT_DECIMALS);
        }
        OverviewKind::ActiveCryptocurrencies => {
            card.value = format_integer(global.active_cryptocurrencies);
        }
    }
    card
}

pub fn to_overview_cards(global: &GlobalMarket, currency: &str) -> Vec<OverviewCard> {
    OverviewKind::all()
        .into_iter()
        .map(|kind| to_overview_card(kind, global, currency))
        .collect()
}

// ========== Market Summary ==========

/// Number of coins in the market summary panel
pub const MARKET_SUMMARY_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummaryRow {
    pub id: String,
    pub rank: String,
    pub name: String,
    pub symbol: String,
    pub icon: String,
    pub price: String,
    pub change: String,
    pub is_negative: bool,
    pub volume: String,
}

pub fn to_market_summary(coins: &[Coin], currency: &str) -> Vec<MarketSummaryRow> {
    top_n(coins, MARKET_SUMMARY_LEN)
        .iter()
        .map(|coin| MarketSummaryRow {
            id: coin.id.clone(),
            rank: coin
                .market_cap_rank
                .map(|r| format!("#{}", r))
                .unwrap_or_else(|| MISSING.to_string()),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            icon: coin.image.clone(),
            price: format_currency(coin.current_price, currency),
            change: format_signed_percent(coin.price_change_percentage_24h, PERCENT_DECIMALS),
            is_negative: is_negative_change(coin.price_change_percentage_24h),
            volume: coin
                .total_volume
                .map(format_compact)
                .unwrap_or_else(|| MISSING.to_string()),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub(crate) fn coin(id: &str, name: &str, rank: u32, price: f64, change: f64) -> Coin {
        Coin {
            id: id.to_string(),
            symbol: id.chars().take(3).collect(),
            name: name.to_string(),
            image: format!("https://img.example/{}.png", id),
            current_price: price,
            price_change_percentage_24h: change,
            high_24h: Some(price * 1.1),
            low_24h: Some(price * 0.9),
            total_volume: Some(1_000_000.0 / rank as f64),
            market_cap: 1_000_000_000.0 / rank as f64,
            market_cap_rank: Some(rank),
        }
    }

    // ========== Table Row Tests ==========

    #[test]
    fn test_one_row_per_coin() {
        let coins: Vec<Coin> = (1..=12)
            .map(|r| coin(&format!("coin-{}", r), &format!("Coin {}", r), r, r as f64 * 10.0, 0.5))
            .collect();
        let rows = to_table_rows(&coins, "inr");

        assert_eq!(rows.len(), coins.len());
        let ids: std::collections::HashSet<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), coins.len());
    }

    #[test]
    fn test_row_price_round_trips() {
        let row = to_table_row(&coin("bitcoin", "Bitcoin", 1, 5712345.67, -1.2), "inr");
        let parsed: f64 = row
            .display
            .price
            .trim_start_matches('₹')
            .replace(',', "")
            .parse()
            .unwrap();

        assert!((parsed - row.price).abs() < 0.005);
        assert_eq!(row.display.change, "-1.20%");
        assert!(row.display.is_negative);
    }

    #[test]
    fn test_row_missing_values() {
        let mut c = coin("tiny", "Tiny", 1, 1.0, 0.0);
        c.total_volume = None;
        c.market_cap_rank = None;
        let row = to_table_row(&c, "inr");

        assert_eq!(row.display.volume, "-");
        assert_eq!(row.display.market_rank, "-");
        assert_eq!(row.market_rank, None);
    }

    #[test]
    fn test_csv_columns_follow_field_order() {
        let mut row = to_table_row(&coin("bitcoin", "Bitcoin", 1, 100.0, 1.0), "inr");
        row.high_24h = Some(110.0);
        row.low_24h = None;

        let csv = crate::services::export::rows_to_csv(&TABLE_ROW_FIELDS, [&row]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "name,icon,price,volume,market_rank,market_cap,change_percentage,high_24h,low_24h"
        );
        assert_eq!(
            lines[1],
            "Bitcoin,https://img.example/bitcoin.png,100.0,1000000.0,1,1000000000.0,1.0,110.0,"
        );
    }

    #[test]
    fn test_rows_memo_reuses_rows() {
        let coins = Arc::new(vec![coin("bitcoin", "Bitcoin", 1, 100.0, 1.0)]);
        let mut memo = TableRowsMemo::default();

        let first = memo.rows_for(&coins, "inr");
        let second = memo.rows_for(&coins, "inr");
        assert!(Arc::ptr_eq(&first, &second));

        let refreshed = Arc::new(vec![coin("bitcoin", "Bitcoin", 1, 200.0, 1.0)]);
        let third = memo.rows_for(&refreshed, "inr");
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third[0].price, 200.0);
    }

    // ========== Sign Tests ==========

    #[test]
    fn test_negative_zero_is_not_negative() {
        let card = to_price_card(&coin("flat", "Flat", 1, 1.0, -0.0), "inr");
        assert!(!card.is_negative);
        assert_eq!(card.change, "+0.00%");
    }

    #[test]
    fn test_tiny_negative_change_is_negative() {
        let card = to_price_card(&coin("dip", "Dip", 1, 1.0, -0.001), "inr");
        assert!(card.is_negative);
        assert_eq!(card.change, "-0.00%");
    }

    // ========== Combobox Tests ==========

    #[test]
    fn test_combobox_option_four_decimals() {
        let option = to_combobox_option(&coin("ethereum", "Ethereum", 2, 250000.0, 2.345678), "inr");

        assert_eq!(option.value, "ethereum");
        assert_eq!(option.label, "Ethereum");
        assert_eq!(option.symbol, "ETH");
        assert_eq!(option.price, "₹250,000.00");
        assert_eq!(option.change, "+2.3457%");
        assert!(!option.is_negative);
    }

    // ========== Chart Tests ==========

    #[test]
    fn test_chart_series_dates_and_rounding() {
        let points = vec![
            PricePoint {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
                price: 101.456,
            },
            PricePoint {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
                price: 0.1234567,
            },
        ];
        let series = to_chart_series(&points);

        assert_eq!(series[0].date, "2024-03-01");
        assert_eq!(series[0].price, 101.46);
        assert_eq!(series[0].x, 1_709_251_200.0);
        assert_eq!(series[1].price, 0.123457);
    }

    // ========== Overview Tests ==========

    #[test]
    fn test_overview_cards_from_snapshot() {
        let mut global = GlobalMarket::default();
        global.total_market_cap.insert("usd".to_string(), 2_500_000_000_000.0);
        global.market_cap_percentage.insert("btc".to_string(), 51.234);
        global.active_cryptocurrencies = 15234;
        global.market_cap_change_percentage_24h_usd = Some(-0.56);

        let cards = to_overview_cards(&global, "usd");

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].kind.title(), "Market Cap");
        assert_eq!(cards[0].value, "$2.5T");
        assert_eq!(cards[0].change.as_deref(), Some("-0.56%"));
        assert!(cards[0].is_negative);
        assert_eq!(cards[1].value, "$0");
        assert_eq!(cards[2].value, "51.23%");
        assert_eq!(cards[3].value, "15,234");
    }

    #[test]
    fn test_overview_falls_back_to_usd_symbol() {
        let mut global = GlobalMarket::default();
        global.total_market_cap.insert("usd".to_string(), 2_500_000_000_000.0);

        let card = to_overview_card(OverviewKind::MarketCap, &global, "inr");
        assert_eq!(card.value, "$2.5T");
        assert_eq!(card.change, None);
    }

    // ========== Top-N Tests ==========

    #[test]
    fn test_top_n_truncates() {
        let coins: Vec<Coin> = (1..=7)
            .map(|r| coin(&format!("c{}", r), &format!("C{}", r), r, 1.0, 1.0))
            .collect();

        assert_eq!(to_price_cards(&coins, "inr").len(), 3);
        assert_eq!(to_market_summary(&coins, "inr").len(), 5);
        assert_eq!(to_market_summary(&coins[..2], "inr").len(), 2);
        assert_eq!(to_market_summary(&coins, "inr")[0].rank, "#1");
        assert!(top_n::<Coin>(&[], 3).is_empty());
    }
}
