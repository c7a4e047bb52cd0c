//! # Price Chart Panel
//!
//! Coin picker, price badge, window toggle and the `egui_plot` line chart.

use crate::app::chart::{ChartPhase, ChartWindow};
use crate::app::view_models::{to_chart_series, to_combobox_option};
use crate::app::App;
use crate::services::QuerySnapshot;
use crate::ui::theme::Theme;
use crate::ui::widgets::coin_picker::render_coin_picker;
use crate::ui::widgets::status;
use egui_plot::{Line, Plot, PlotPoints};
use shared::{Coin, PricePoint};

const PLOT_HEIGHT: f32 = 260.0;

pub fn render_price_chart(
    ui: &mut egui::Ui,
    app: &mut App,
    coins: &QuerySnapshot<Vec<Coin>>,
    currency: &str,
) {
    let theme = Theme::current(ui.ctx());
    let (phase, window, points) = {
        let state = app.state.read();
        let points: Vec<PricePoint> = state.chart.visible_points().to_vec();
        (state.chart.phase().clone(), state.chart.window(), points)
    };
    let selected = match &phase {
        ChartPhase::NoCoin => None,
        ChartPhase::Loading { coin_id }
        | ChartPhase::Ready { coin_id, .. }
        | ChartPhase::Failed { coin_id, .. } => Some(coin_id.as_str()),
    };

    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());

        let Some(coin_list) = &coins.data else {
            if coins.is_error {
                status::error_message(ui, &theme, "coins", coins.error.as_ref());
            } else {
                let width = ui.available_width();
                status::skeleton(ui, &theme, 220.0, 20.0);
                ui.add_space(8.0);
                status::skeleton(ui, &theme, width, PLOT_HEIGHT);
            }
            return;
        };

        ui.horizontal(|ui| {
            render_coin_picker(ui, app, coin_list, selected, currency);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for option in ChartWindow::all().into_iter().rev() {
                    if ui.selectable_label(window == option, option.label()).clicked() {
                        app.set_chart_window(option);
                    }
                }
            });
        });

        if let Some(coin) = selected.and_then(|id| coin_list.iter().find(|c| c.id == id)) {
            let option = to_combobox_option(coin, currency);
            ui.horizontal(|ui| {
                ui.heading(&option.price);
                ui.colored_label(
                    theme.change_color(option.is_negative),
                    format!("{} {}", Theme::change_arrow(option.is_negative), option.change),
                );
            });
        }
        ui.add_space(8.0);

        match &phase {
            ChartPhase::NoCoin => status::empty_message(ui, &theme, "Select a coin to see its price history."),
            ChartPhase::Loading { .. } => {
                let width = ui.available_width();
                status::skeleton(ui, &theme, width, PLOT_HEIGHT);
            }
            ChartPhase::Failed { error, .. } => {
                status::error_message(ui, &theme, "price history", Some(error));
            }
            ChartPhase::Ready { .. } if points.is_empty() => {
                status::empty_message(ui, &theme, "No price history available.");
            }
            ChartPhase::Ready { coin_id, .. } => render_plot(ui, &theme, coin_id, &points),
        }
    });
}

fn render_plot(ui: &mut egui::Ui, theme: &Theme, coin_id: &str, points: &[PricePoint]) {
    let series = to_chart_series(points);
    let dates: Vec<(f64, String)> = series.iter().map(|p| (p.x, p.date.clone())).collect();
    let line_points: Vec<[f64; 2]> = series.iter().map(|p| [p.x, p.price]).collect();

    Plot::new(("price_chart", coin_id))
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show_axes([true, true])
        .x_axis_formatter(move |mark, _range| {
            dates
                .iter()
                .min_by(|a, b| {
                    (a.0 - mark.value)
                        .abs()
                        .total_cmp(&(b.0 - mark.value).abs())
                })
                .map(|(_, date)| date.clone())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Price", PlotPoints::from(line_points))
                    .color(theme.selected)
                    .width(2.0),
            );
        });
}
