//! # Shell Handlers
//!
//! Header search and table dialog open/close.

use crate::app::state::AppState;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

/// Record a header search edit.
pub(crate) fn handle_search_input(state: Arc<RwLock<AppState>>, text: String, now: Instant) {
    let mut state = state.write();
    state.header_search.on_input(text, now);
}

/// Commit the debounced search term and mirror it into the shell.
///
/// Returns `true` when the committed term changed.
pub(crate) fn poll_search(state: Arc<RwLock<AppState>>, now: Instant) -> bool {
    let mut state = state.write();
    if !state.header_search.poll(now) {
        return false;
    }
    let term = state.header_search.committed().to_string();
    state.shell.set_search(term);
    true
}

/// Drop the header search (after a match was picked).
pub(crate) fn clear_search(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    state.header_search.clear();
    state.shell.set_search(String::new());
}

/// "View all results": commit whatever is typed and open the table filtered by it.
pub(crate) fn open_table_from_search(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    let typed = state.header_search.input().to_string();
    state.shell.set_search(typed);
    let seed = state.shell.open_from_search();
    state.table.reset_with_filter(seed);
    state.header_search.clear();
    tracing::debug!(filter = %state.table.filter(), "Table dialog opened from search");
}

/// "See all": open the table with the current shell term.
pub(crate) fn open_table_dialog(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    let seed = state.shell.open_dialog();
    state.table.reset_with_filter(seed);
}

/// Close the dialog; the next open starts unfiltered, unsorted, on page 1.
pub(crate) fn close_table_dialog(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    state.shell.close_dialog();
    state.table.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::table::TableColumn;
    use std::time::Duration;

    fn shared_state() -> Arc<RwLock<AppState>> {
        Arc::new(RwLock::new(AppState::new("inr")))
    }

    #[test]
    fn test_search_commits_after_debounce() {
        let state = shared_state();
        let start = Instant::now();
        handle_search_input(state.clone(), "eth".into(), start);

        assert!(!poll_search(state.clone(), start + Duration::from_millis(10)));
        assert!(poll_search(state.clone(), start + Duration::from_millis(300)));
        assert_eq!(state.read().shell.search(), "eth");
    }

    #[test]
    fn test_view_all_seeds_table_filter() {
        let state = shared_state();
        handle_search_input(state.clone(), "sol".into(), Instant::now());
        open_table_from_search(state.clone());

        let state = state.read();
        assert!(state.shell.is_table_dialog_open());
        assert_eq!(state.table.filter(), "sol");
        assert_eq!(state.header_search.input(), "");
    }

    #[test]
    fn test_close_then_reopen_starts_clean() {
        let state = shared_state();
        handle_search_input(state.clone(), "sol".into(), Instant::now());
        open_table_from_search(state.clone());
        {
            let mut s = state.write();
            s.table.toggle_sort(TableColumn::Price);
            s.table.set_page(2);
        }

        close_table_dialog(state.clone());
        open_table_dialog(state.clone());

        let state = state.read();
        assert_eq!(state.shell.search(), "");
        assert_eq!(state.table.filter(), "");
        assert_eq!(state.table.sort(), None);
        assert_eq!(state.table.page(), 1);
    }
}
