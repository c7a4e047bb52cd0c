//! # Application State Types
//!
//! UI-side state shared between the egui thread and the event handlers.
//! Fetched data is not stored here: it lives in the query caches
//! ([`crate::services::MarketQueries`]) and is read through snapshots.

use crate::app::chart::ChartState;
use crate::app::shell::{HeaderSearch, ShellState};
use crate::app::table::TableEngine;
use crate::app::view_models::TableRowsMemo;
use std::path::PathBuf;

/// Toast severity, mapped onto `egui_notify` levels by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Main application state
pub struct AppState {
    /// Dialog open flag and shared search term
    pub shell: ShellState,
    /// Header search box with debounce
    pub header_search: HeaderSearch,
    /// Price chart selection and window
    pub chart: ChartState,
    /// Filter/sort/page state of the market table dialog
    pub table: TableEngine,
    /// Table rows derived from the current coin list
    pub table_rows: TableRowsMemo,
    /// Quote currency for every displayed amount
    pub currency: String,
    /// Toasts waiting to be shown (drained by the UI)
    pub pending_notifications: Vec<Notice>,
    /// Where the last CSV export was written
    pub last_export: Option<PathBuf>,
    /// Set by handlers when a result must be painted without waiting for input
    pub needs_immediate_repaint: bool,
}

impl AppState {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            shell: ShellState::default(),
            header_search: HeaderSearch::default(),
            chart: ChartState::default(),
            table: TableEngine::default(),
            table_rows: TableRowsMemo::default(),
            currency: currency.into(),
            pending_notifications: Vec::new(),
            last_export: None,
            needs_immediate_repaint: false,
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.pending_notifications.push(Notice {
            level,
            message: message.into(),
        });
        self.needs_immediate_repaint = true;
    }

    pub fn take_notifications(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending_notifications)
    }
}
