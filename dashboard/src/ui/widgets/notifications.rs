//! # Notifications Widget
//!
//! Toast notifications (egui-notify) for export results and refresh failures.

use crate::app::{Notice, NoticeLevel};
use egui_notify::Toasts;

/// Notification manager for the application
#[derive(Default)]
pub struct NotificationManager {
    pub toasts: Toasts,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: String) {
        self.toasts.success(message);
    }

    pub fn error(&mut self, message: String) {
        self.toasts.error(message);
    }

    pub fn info(&mut self, message: String) {
        self.toasts.info(message);
    }

    /// Queue notices raised by the app since the last frame.
    pub fn push_all(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            match notice.level {
                NoticeLevel::Info => self.info(notice.message),
                NoticeLevel::Success => self.success(notice.message),
                NoticeLevel::Error => self.error(notice.message),
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }
}
