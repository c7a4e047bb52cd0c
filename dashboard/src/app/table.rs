//! # Table Engine
//!
//! Filtering, sorting and pagination of the market table, plus the row set
//! handed to the CSV export.
//!
//! ```text
//! rows ──filter(term)──► filtered ──sort(key)──► ordered ──paginate(page, size)──► visible
//!                                                    │
//!                                                    └──► CSV export
//! ```
//!
//! The free functions are pure. [`TableEngine`] only holds the user's current
//! choices (term, sort key, page, page size).

use crate::app::view_models::TableRow;
use crate::core::error::{AppError, Result};
use std::cmp::Ordering;

/// Allowed page sizes.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [8, 16, 25, 50];
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Sortable columns of the market table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableColumn {
    Name,
    Price,
    Volume,
    MarketRank,
    MarketCap,
    High24h,
    Low24h,
    Change,
}

impl TableColumn {
    /// Columns in display order.
    pub fn all() -> [TableColumn; 8] {
        [
            TableColumn::Name,
            TableColumn::Price,
            TableColumn::Volume,
            TableColumn::MarketRank,
            TableColumn::MarketCap,
            TableColumn::High24h,
            TableColumn::Low24h,
            TableColumn::Change,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            TableColumn::Name => "Name",
            TableColumn::Price => "Price",
            TableColumn::Volume => "Volume",
            TableColumn::MarketRank => "Market Rank",
            TableColumn::MarketCap => "Market Cap",
            TableColumn::High24h => "High 24h",
            TableColumn::Low24h => "Low 24h",
            TableColumn::Change => "24h Change",
        }
    }

    fn compare(&self, a: &TableRow, b: &TableRow) -> Ordering {
        match self {
            TableColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            TableColumn::Price => a.price.total_cmp(&b.price),
            TableColumn::Volume => compare_optional(a.volume, b.volume),
            TableColumn::MarketRank => a.market_rank.cmp(&b.market_rank),
            TableColumn::MarketCap => a.market_cap.total_cmp(&b.market_cap),
            TableColumn::High24h => compare_optional(a.high_24h, b.high_24h),
            TableColumn::Low24h => compare_optional(a.low_24h, b.low_24h),
            TableColumn::Change => a.change_percentage.total_cmp(&b.change_percentage),
        }
    }
}

/// Missing values order before present ones.
fn compare_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The single active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: TableColumn,
    pub direction: SortDirection,
}

/// Next sort state after clicking `column`'s header.
///
/// Same column cycles ascending → descending → unsorted; a different column
/// starts over at ascending.
pub fn next_sort(current: Option<SortKey>, column: TableColumn) -> Option<SortKey> {
    match current {
        Some(key) if key.column == column => match key.direction {
            SortDirection::Ascending => Some(SortKey {
                column,
                direction: SortDirection::Descending,
            }),
            SortDirection::Descending => None,
        },
        _ => Some(SortKey {
            column,
            direction: SortDirection::Ascending,
        }),
    }
}

/// Rows whose name contains `term`, case-insensitively, in input order.
pub fn filter_rows<'a>(rows: &'a [TableRow], term: &str) -> Vec<&'a TableRow> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| row.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort; `None` keeps the input order.
pub fn sort_rows(rows: &mut [&TableRow], sort: Option<SortKey>) {
    let Some(key) = sort else {
        return;
    };
    rows.sort_by(|a, b| {
        let ordering = key.column.compare(a, b);
        match key.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// `ceil(count / page_size)`, at least zero.
pub fn page_count(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamp a requested 1-based page into `1..=max(page_count, 1)`.
pub fn clamp_page(page: usize, count: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(count, page_size).max(1))
}

/// Visible slice of `rows` for a 1-based `page`, after clamping.
pub fn paginate<'a, T>(rows: &'a [T], page: usize, page_size: usize) -> &'a [T] {
    if page_size == 0 {
        return &[];
    }
    let page = clamp_page(page, rows.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(rows.len());
    &rows[start.min(rows.len())..end]
}

/// What the table renders this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub rows: Vec<&'a TableRow>,
    /// Effective page after clamping, 1-based
    pub page: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub page_size: usize,
}

impl TableView<'_> {
    /// 1-based index range of the visible rows (`(0, 0)` when empty).
    pub fn showing_range(&self) -> (usize, usize) {
        if self.rows.is_empty() {
            return (0, 0);
        }
        let first = (self.page - 1) * self.page_size + 1;
        (first, first + self.rows.len() - 1)
    }
}

/// User-controlled table state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEngine {
    filter: String,
    sort: Option<SortKey>,
    page: usize,
    page_size: usize,
}

impl Default for TableEngine {
    fn default() -> Self {
        Self {
            filter: String::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableEngine {

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sort direction of `column`, if it is the active sort column.
    pub fn sort_direction(&self, column: TableColumn) -> Option<SortDirection> {
        self.sort
            .filter(|key| key.column == column)
            .map(|key| key.direction)
    }

    /// Replace the filter term; the page resets to 1 when the predicate changes.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term.trim().to_lowercase() != self.filter.trim().to_lowercase() {
            self.page = 1;
        }
        self.filter = term;
    }

    pub fn toggle_sort(&mut self, column: TableColumn) {
        self.sort = next_sort(self.sort, column);
    }

    /// Request a 1-based page; clamped against the row count at render time.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Change the page size to one of [`PAGE_SIZE_OPTIONS`] and return to page 1.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(AppError::Validation(format!(
                "Page size {} is not one of {:?}",
                size, PAGE_SIZE_OPTIONS
            )));
        }
        self.page_size = size;
        self.page = 1;
        Ok(())
    }

    /// Back to unfiltered, unsorted, page 1 (page size is kept).
    pub fn reset(&mut self) {
        self.reset_with_filter(String::new());
    }

    /// Reset sort and page, keep the page size, and seed the filter.
    pub fn reset_with_filter(&mut self, term: impl Into<String>) {
        *self = Self {
            filter: term.into(),
            page_size: self.page_size,
            ..Self::default()
        };
    }

    /// All rows matching the filter, in sort order.
    pub fn filtered_sorted<'a>(&self, rows: &'a [TableRow]) -> Vec<&'a TableRow> {
        let mut filtered = filter_rows(rows, &self.filter);
        sort_rows(&mut filtered, self.sort);
        filtered
    }

    /// The visible page, with the stored page clamped into range.
    ///
    /// The clamped page is written back so the pager never points past the end.
    pub fn view<'a>(&mut self, rows: &'a [TableRow]) -> TableView<'a> {
        let ordered = self.filtered_sorted(rows);
        let filtered_count = ordered.len();
        self.page = clamp_page(self.page, filtered_count, self.page_size);

        TableView {
            rows: paginate(&ordered, self.page, self.page_size).to_vec(),
            page: self.page,
            page_count: page_count(filtered_count, self.page_size),
            filtered_count,
            page_size: self.page_size,
        }
    }
}
