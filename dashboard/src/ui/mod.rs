//! # GUI Rendering
//!
//! Immediate-mode rendering of the dashboard. Render code reads cache
//! snapshots and [`crate::app::AppState`] and forwards user actions to
//! [`App`] methods; it never mutates state directly.

pub mod chart;
pub mod screens;
pub mod theme;
pub mod widgets;

use crate::app::App;
use crate::ui::widgets::notifications::NotificationManager;

/// Main render function - called every frame by eframe
pub fn render(ctx: &egui::Context, app: &mut App, notifications: &mut NotificationManager) {
    egui::CentralPanel::default().show(ctx, |ui| {
        screens::dashboard::render(ui, app);
    });

    let dialog_open = app.state.read().shell.is_table_dialog_open();
    if dialog_open {
        screens::table_dialog::render_table_dialog(ctx, app);
    }

    let notices = app.state.write().take_notifications();
    notifications.push_all(notices);
    notifications.show(ctx);
}
