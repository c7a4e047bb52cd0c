//! # Shell State
//!
//! The only cross-panel mutable state: whether the full market table dialog
//! is open, and the header's active search term. The header search box and
//! the table dialog share it through [`ShellState`]; nothing else writes it.
//!
//! Rules:
//! - "View all results" from the header opens the dialog with the table
//!   filter seeded from the search term.
//! - Closing the dialog clears the search term, so the next open starts
//!   unfiltered, unsorted, on page 1.

use shared::Coin;
use std::time::{Duration, Instant};

/// Header search input settles this long before matches are recomputed
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Matches shown in the header dropdown
pub const SEARCH_RESULTS_LEN: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    table_dialog_open: bool,
    search: String,
}

impl ShellState {
    pub fn is_table_dialog_open(&self) -> bool {
        self.table_dialog_open
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Open the dialog from the header's "view all" action.
    ///
    /// Returns the term the table filter is seeded with.
    pub fn open_from_search(&mut self) -> String {
        self.table_dialog_open = true;
        self.search.clone()
    }

    /// Open the dialog from the "See all" button; seeds with the current term.
    pub fn open_dialog(&mut self) -> String {
        self.open_from_search()
    }

    /// Close the dialog and clear the search term.
    pub fn close_dialog(&mut self) {
        self.table_dialog_open = false;
        self.search.clear();
    }
}

/// Debounced header search box.
///
/// `input` follows every keystroke; `committed` only catches up once the input
/// has been still for [`SEARCH_DEBOUNCE`]. Matches are computed from
/// `committed`. Time is passed in so the debounce can be driven by tests.
#[derive(Debug, Clone, Default)]
pub struct HeaderSearch {
    input: String,
    committed: String,
    last_edit: Option<Instant>,
}

impl HeaderSearch {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Record an edit of the input box.
    pub fn on_input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.last_edit = Some(now);
    }

    /// Commit the input once the debounce delay has passed.
    ///
    /// Returns `true` when the committed term changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(edited) = self.last_edit else {
            return false;
        };
        if now.saturating_duration_since(edited) < SEARCH_DEBOUNCE {
            return false;
        }
        self.last_edit = None;
        if self.committed == self.input {
            return false;
        }
        self.committed = self.input.clone();
        true
    }

    /// Time left before a pending edit commits, for scheduling a repaint.
    pub fn pending_delay(&self, now: Instant) -> Option<Duration> {
        self.last_edit
            .map(|edited| SEARCH_DEBOUNCE.saturating_sub(now.saturating_duration_since(edited)))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First [`SEARCH_RESULTS_LEN`] coins whose name or symbol contains the
    /// committed term. Empty term yields no matches.
    pub fn matches<'a>(&self, coins: &'a [Coin]) -> Vec<&'a Coin> {
        let needle = self.committed.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        coins
            .iter()
            .filter(|coin| {
                coin.name.to_lowercase().contains(&needle)
                    || coin.symbol.to_lowercase().contains(&needle)
            })
            .take(SEARCH_RESULTS_LEN)
            .collect()
    }
}
