//! # Market Summary
//!
//! Top five coins with a "See all" escalation into the table dialog.

use crate::app::view_models::{to_market_summary, MARKET_SUMMARY_LEN};
use crate::app::App;
use crate::services::QuerySnapshot;
use crate::ui::theme::Theme;
use crate::ui::widgets::icons::{material, size, Icons};
use crate::ui::widgets::status;
use shared::Coin;

pub fn render_market_summary(
    ui: &mut egui::Ui,
    app: &mut App,
    coins: &QuerySnapshot<Vec<Coin>>,
    currency: &str,
) {
    let theme = Theme::current(ui.ctx());

    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(Icons::icon_color(material::TABLE, size::MEDIUM, theme.selected));
            ui.heading("Market");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(coins.data.is_some(), egui::Button::new("See all"))
                    .clicked()
                {
                    app.open_table_dialog();
                }
            });
        });
        ui.add_space(8.0);

        let Some(data) = &coins.data else {
            if coins.is_error {
                status::error_message(ui, &theme, "coins", coins.error.as_ref());
            } else {
                status::skeleton_lines(ui, &theme, MARKET_SUMMARY_LEN);
            }
            return;
        };

        let rows = to_market_summary(data, currency);
        if rows.is_empty() {
            status::empty_message(ui, &theme, "No coins available.");
            return;
        }

        egui::Grid::new("market_summary")
            .num_columns(5)
            .spacing([24.0, 8.0])
            .striped(true)
            .show(ui, |ui| {
                for header in ["#", "Coin", "Price", "24h", "Volume"] {
                    ui.colored_label(theme.dim, header);
                }
                ui.end_row();

                for row in rows {
                    ui.label(&row.rank);
                    ui.horizontal(|ui| {
                        if ui.link(&row.name).clicked() {
                            app.select_coin(&row.id);
                        }
                        ui.colored_label(theme.dim, &row.symbol);
                    });
                    ui.monospace(&row.price);
                    ui.colored_label(theme.change_color(row.is_negative), &row.change);
                    ui.monospace(&row.volume);
                    ui.end_row();
                }
            });
    });
}
