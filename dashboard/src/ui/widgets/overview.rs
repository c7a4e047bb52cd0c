//! # Market Overview
//!
//! Four aggregate cards built from the global market snapshot.

use crate::app::view_models::{to_overview_cards, OverviewKind};
use crate::services::{QuerySnapshot, QueryStatus};
use crate::ui::theme::Theme;
use crate::ui::widgets::icons::{material, size, Icons};
use crate::ui::widgets::status;
use shared::GlobalMarket;

pub fn render_overview(ui: &mut egui::Ui, global: &QuerySnapshot<GlobalMarket>, currency: &str) {
    let theme = Theme::current(ui.ctx());

    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(Icons::icon_color(material::PUBLIC, size::MEDIUM, theme.selected));
            ui.heading("Market Overview");
        });
        ui.add_space(8.0);

        match (global.status(), &global.data) {
            (QueryStatus::Ready, Some(global)) => {
                egui::Grid::new("market_overview")
                    .num_columns(2)
                    .spacing([16.0, 16.0])
                    .show(ui, |ui| {
                        for (i, card) in to_overview_cards(global, currency).into_iter().enumerate() {
                            ui.vertical(|ui| {
                                ui.colored_label(theme.dim, card.kind.title());
                                ui.horizontal(|ui| {
                                    ui.heading(&card.value);
                                    if let Some(change) = &card.change {
                                        ui.colored_label(
                                            theme.change_color(card.is_negative),
                                            format!("{} {}", Theme::change_arrow(card.is_negative), change),
                                        );
                                    }
                                });
                            });
                            if i % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
            }
            (QueryStatus::Error, _) => {
                status::error_message(ui, &theme, "market overview", global.error.as_ref());
            }
            _ => {
                egui::Grid::new("market_overview_loading")
                    .num_columns(2)
                    .spacing([16.0, 16.0])
                    .show(ui, |ui| {
                        for (i, kind) in OverviewKind::all().into_iter().enumerate() {
                            ui.vertical(|ui| {
                                ui.colored_label(theme.dim, kind.title());
                                status::skeleton(ui, &theme, 120.0, 22.0);
                            });
                            if i % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
            }
        }
    });
}
