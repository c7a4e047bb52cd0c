//! # Table Handlers
//!
//! Filter/sort/page actions from the table dialog and the CSV export.

use crate::app::state::AppState;
use crate::app::table::TableColumn;
use crate::app::view_models::{TableRow, TABLE_ROW_FIELDS};
use crate::core::error::Result;
use crate::services::export::rows_to_csv;
use parking_lot::RwLock;
use std::sync::Arc;

pub(crate) fn handle_filter_change(state: Arc<RwLock<AppState>>, term: String) {
    state.write().table.set_filter(term);
}

pub(crate) fn handle_sort_click(state: Arc<RwLock<AppState>>, column: TableColumn) {
    let mut state = state.write();
    state.table.toggle_sort(column);
    tracing::debug!(column = column.title(), sort = ?state.table.sort(), "Table sort changed");
}

pub(crate) fn handle_page_change(state: Arc<RwLock<AppState>>, page: usize) {
    state.write().table.set_page(page);
}

pub(crate) fn handle_page_size_change(state: Arc<RwLock<AppState>>, size: usize) -> Result<()> {
    state.write().table.set_page_size(size)
}

/// CSV of every row matching the current filter, in the current sort order.
pub(crate) fn export_csv_contents(state: Arc<RwLock<AppState>>, rows: &[TableRow]) -> Result<String> {
    let state = state.read();
    let ordered = state.table.filtered_sorted(rows);
    tracing::info!(rows = ordered.len(), filter = %state.table.filter(), "Exporting table");
    rows_to_csv(&TABLE_ROW_FIELDS, ordered)
}
