//! # Panel Status Widgets
//!
//! Placeholders for the loading, error and empty states every panel can be in.

use crate::core::error::AppError;
use crate::ui::theme::Theme;
use crate::ui::widgets::icons::{material, size, Icons};

/// Grey block standing in for content that is still loading.
pub fn skeleton(ui: &mut egui::Ui, theme: &Theme, width: f32, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, egui::CornerRadius::same(4), theme.colors.skeleton);
}

/// A few skeleton lines filling the available width.
pub fn skeleton_lines(ui: &mut egui::Ui, theme: &Theme, lines: usize) {
    let width = ui.available_width();
    for i in 0..lines {
        let fraction = if i % 2 == 0 { 1.0 } else { 0.7 };
        skeleton(ui, theme, width * fraction, 14.0);
    }
}

/// Inline error for a panel whose query failed.
pub fn error_message(ui: &mut egui::Ui, theme: &Theme, what: &str, error: Option<&AppError>) {
    ui.horizontal_wrapped(|ui| {
        ui.label(Icons::icon_color(material::ERROR, size::SMALL, theme.error));
        ui.colored_label(theme.error, format!("Failed to load {}", what));
    });
    if let Some(error) = error {
        ui.colored_label(theme.dim, error.to_string());
    }
}

pub fn empty_message(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        ui.colored_label(theme.dim, text);
        ui.add_space(8.0);
    });
}
