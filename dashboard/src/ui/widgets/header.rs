//! # Header
//!
//! Logo, live search with a dropdown of the top matches, the refresh button
//! and the dark/light toggle.

use crate::app::view_models::to_combobox_option;
use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::widgets::icons::{material, size, Icons};
use shared::Coin;

pub fn render_header(ui: &mut egui::Ui, app: &mut App, coins: Option<&[Coin]>, currency: &str) {
    let theme = Theme::current(ui.ctx());

    let (mut input, committed, matches) = {
        let state = app.state.read();
        let matches: Vec<Coin> = coins
            .map(|coins| state.header_search.matches(coins).into_iter().cloned().collect())
            .unwrap_or_default();
        (
            state.header_search.input().to_string(),
            state.header_search.committed().to_string(),
            matches,
        )
    }; // Lock released here

    let mut search_rect = None;
    ui.horizontal(|ui| {
        ui.label(Icons::icon_color(material::CHART, size::LARGE, theme.selected));
        ui.heading(egui::RichText::new("Crypto Flux").strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (icon, hint) = match theme.mode {
                egui::Theme::Dark => (material::LIGHT_MODE, "Light mode"),
                egui::Theme::Light => (material::DARK_MODE, "Dark mode"),
            };
            let toggle = ui.button(Icons::icon(icon, size::MEDIUM));
            if toggle.on_hover_text(hint).clicked() {
                Theme::set_mode(ui.ctx(), Theme::toggled(theme.mode));
            }

            let fetching = app.queries().coins_snapshot().is_fetching
                || app.queries().global_snapshot().is_fetching;
            let refresh = ui.add_enabled(
                !fetching,
                egui::Button::new(Icons::icon(material::REFRESH, size::MEDIUM)),
            );
            if refresh.on_hover_text("Refresh").clicked() {
                app.refresh();
            }
            if fetching {
                ui.spinner();
            }

            let response = ui.add(
                egui::TextEdit::singleline(&mut input)
                    .hint_text("Search coins...")
                    .desired_width(260.0),
            );
            ui.label(Icons::icon_color(material::SEARCH, size::MEDIUM, theme.dim));
            if response.changed() {
                app.search_input(input.clone());
            }
            search_rect = Some(response.rect);
        });
    });

    // Dropdown under the search box once the debounced term is non-empty
    let (Some(rect), false) = (search_rect, committed.trim().is_empty()) else {
        return;
    };
    egui::Area::new(egui::Id::new("header_search_results"))
        .order(egui::Order::Foreground)
        .fixed_pos(rect.left_bottom() + egui::vec2(0.0, 4.0))
        .show(ui.ctx(), |ui| {
            theme.card_frame().show(ui, |ui| {
                ui.set_width(rect.width().max(260.0));
                if coins.is_none() {
                    ui.spinner();
                    return;
                }
                if matches.is_empty() {
                    ui.colored_label(theme.dim, "No coins found");
                    return;
                }
                for coin in &matches {
                    let option = to_combobox_option(coin, currency);
                    let text = format!("{}  {}  {}", option.label, option.symbol, option.price);
                    if ui.selectable_label(false, text).clicked() {
                        app.pick_search_match(&option.value);
                    }
                }
                ui.separator();
                let view_all = ui.button(format!("View all results {}", material::ARROW_RIGHT));
                if view_all.clicked() {
                    app.open_table_from_search();
                }
            });
        });
}
