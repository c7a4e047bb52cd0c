//! # Dashboard Screen
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Crypto Flux                        [search........] [⟳]  │
//! ├──────────────────┬──────────────────┬────────────────────┤
//! │ price card       │ price card       │ price card         │
//! ├──────────────────┴──────────┬───────┴────────────────────┤
//! │ price chart                 │ market overview            │
//! ├─────────────────────────────┴────────────────────────────┤
//! │ market summary (top 5)                        [See all]  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each panel reads its own query snapshot, so one failing query only
//! affects the panels built from it.

use crate::app::App;
use crate::ui::chart::render_price_chart;
use crate::ui::widgets::header::render_header;
use crate::ui::widgets::market_summary::render_market_summary;
use crate::ui::widgets::overview::render_overview;
use crate::ui::widgets::price_strip::render_price_strip;

pub fn render(ui: &mut egui::Ui, app: &mut App) {
    let currency = app.currency();
    let coins = app.queries().coins_snapshot();
    let global = app.queries().global_snapshot();

    render_header(ui, app, coins.data.as_deref().map(Vec::as_slice), &currency);
    ui.add_space(12.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        render_price_strip(ui, &coins, &currency);
        ui.add_space(12.0);

        ui.columns(2, |columns| {
            render_price_chart(&mut columns[0], app, &coins, &currency);
            render_overview(&mut columns[1], &global, &currency);
        });
        ui.add_space(12.0);

        render_market_summary(ui, app, &coins, &currency);
    });
}
