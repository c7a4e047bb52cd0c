//! # Price Strip
//!
//! The top three coins by market cap, one card each.

use crate::app::view_models::{to_price_cards, PRICE_STRIP_LEN};
use crate::services::QuerySnapshot;
use crate::ui::theme::Theme;
use crate::ui::widgets::status;
use shared::Coin;

pub fn render_price_strip(ui: &mut egui::Ui, coins: &QuerySnapshot<Vec<Coin>>, currency: &str) {
    let theme = Theme::current(ui.ctx());
    let spacing = ui.spacing().item_spacing.x;
    let card_width = (ui.available_width() - spacing * (PRICE_STRIP_LEN as f32 - 1.0))
        / PRICE_STRIP_LEN as f32;

    ui.horizontal(|ui| {
        let Some(coins) = &coins.data else {
            for _ in 0..PRICE_STRIP_LEN {
                theme.card_frame().show(ui, |ui| {
                    ui.set_width(card_width - 24.0);
                    if coins.is_error {
                        status::error_message(ui, &theme, "prices", coins.error.as_ref());
                    } else {
                        status::skeleton_lines(ui, &theme, 2);
                    }
                });
            }
            return;
        };

        for card in to_price_cards(coins, currency) {
            theme.card_frame().show(ui, |ui| {
                ui.set_width(card_width - 24.0);
                ui.horizontal(|ui| {
                    ui.strong(&card.name);
                    ui.colored_label(theme.dim, &card.symbol);
                });
                ui.horizontal(|ui| {
                    ui.heading(&card.price);
                    ui.colored_label(
                        theme.change_color(card.is_negative),
                        format!("{} {}", Theme::change_arrow(card.is_negative), card.change),
                    );
                });
            });
        }
    });
}
