//! # Market Table Dialog
//!
//! Full coin table in a window: name filter, sortable headers, pagination,
//! page-size selector and CSV export of the filtered rows.

use crate::app::table::{TableColumn, PAGE_SIZE_OPTIONS};
use crate::app::view_models::TableRow;
use crate::app::App;
use crate::services::export::DEFAULT_FILENAME;
use crate::ui::theme::Theme;
use crate::ui::widgets::icons::{material, size, Icons};
use crate::ui::widgets::status;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 28.0;

/// One frame's worth of table data, copied out of the state lock.
struct TablePage {
    rows: Vec<TableRow>,
    page: usize,
    page_count: usize,
    filtered_count: usize,
    page_size: usize,
    range: (usize, usize),
}

pub fn render_table_dialog(ctx: &egui::Context, app: &mut App) {
    let theme = Theme::current(ctx);
    let mut open = true;

    egui::Window::new("All Cryptocurrencies")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_size([1000.0, 560.0])
        .show(ctx, |ui| {
            render_toolbar(ui, app, &theme);
            ui.separator();

            let Some(rows) = app.table_rows() else {
                let snapshot = app.queries().coins_snapshot();
                if snapshot.is_error {
                    status::error_message(ui, &theme, "coins", snapshot.error.as_ref());
                } else {
                    status::skeleton_lines(ui, &theme, 8);
                }
                return;
            };

            let page = {
                let mut state = app.state.write();
                let view = state.table.view(&rows);
                TablePage {
                    range: view.showing_range(),
                    rows: view.rows.into_iter().cloned().collect(),
                    page: view.page,
                    page_count: view.page_count,
                    filtered_count: view.filtered_count,
                    page_size: view.page_size,
                }
            }; // Lock released here

            render_table(ui, app, &theme, &page);
            ui.separator();
            render_pagination(ui, app, &page);
        });

    if !open {
        app.close_table_dialog();
    }
}

fn render_toolbar(ui: &mut egui::Ui, app: &mut App, theme: &Theme) {
    let mut filter = app.state.read().table.filter().to_string();

    ui.horizontal(|ui| {
        ui.label(Icons::icon_color(material::SEARCH, size::MEDIUM, theme.dim));
        let response = ui.add(
            egui::TextEdit::singleline(&mut filter)
                .hint_text("Filter by name...")
                .desired_width(240.0),
        );
        if response.changed() {
            app.set_table_filter(filter.clone());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let csv = egui::Button::new(format!("{} CSV", material::DOWNLOAD));
            if ui.add_enabled(app.table_rows().is_some(), csv).clicked() {
                let destination = rfd::FileDialog::new()
                    .set_file_name(DEFAULT_FILENAME)
                    .add_filter("CSV", &["csv"])
                    .save_file();
                match destination {
                    Some(path) => app.export_csv_to(path),
                    None => tracing::debug!("CSV export cancelled"),
                }
            }
        });
    });
}

fn render_table(ui: &mut egui::Ui, app: &mut App, theme: &Theme, page: &TablePage) {
    let sort_directions: Vec<_> = {
        let state = app.state.read();
        TableColumn::all()
            .into_iter()
            .map(|column| state.table.sort_direction(column))
            .collect()
    };
    let mut clicked: Option<TableColumn> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(180.0))
        .columns(Column::auto().at_least(96.0), TableColumn::all().len() - 1)
        .min_scrolled_height(0.0)
        .max_scroll_height(ROW_HEIGHT * 12.0)
        .header(ROW_HEIGHT, |mut header| {
            for (column, direction) in TableColumn::all().into_iter().zip(&sort_directions) {
                header.col(|ui| {
                    let text = match direction {
                        Some(direction) => format!("{} {}", column.title(), direction.indicator()),
                        None => column.title().to_string(),
                    };
                    let label = egui::RichText::new(text).strong();
                    let label = if direction.is_some() { label.color(theme.selected) } else { label };
                    if ui.add(egui::Button::new(label).frame(false)).clicked() {
                        clicked = Some(column);
                    }
                });
            }
        })
        .body(|mut body| {
            if page.rows.is_empty() {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.colored_label(theme.dim, "No results.");
                    });
                    for _ in 1..TableColumn::all().len() {
                        row.col(|_| {});
                    }
                });
                return;
            }

            for data in &page.rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.strong(&data.name);
                    });
                    row.col(|ui| {
                        ui.monospace(&data.display.price);
                    });
                    row.col(|ui| {
                        ui.monospace(&data.display.volume);
                    });
                    row.col(|ui| {
                        ui.label(&data.display.market_rank);
                    });
                    row.col(|ui| {
                        ui.monospace(&data.display.market_cap);
                    });
                    row.col(|ui| {
                        ui.monospace(&data.display.high_24h);
                    });
                    row.col(|ui| {
                        ui.monospace(&data.display.low_24h);
                    });
                    row.col(|ui| {
                        ui.colored_label(
                            theme.change_color(data.display.is_negative),
                            &data.display.change,
                        );
                    });
                });
            }
        });

    if let Some(column) = clicked {
        app.toggle_sort(column);
    }
}

fn render_pagination(ui: &mut egui::Ui, app: &mut App, page: &TablePage) {
    ui.horizontal(|ui| {
        let (first, last) = page.range;
        ui.label(format!("Showing {}–{} of {}", first, last, page.filtered_count));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let next = ui.add_enabled(
                page.page < page.page_count,
                egui::Button::new(Icons::icon(material::CHEVRON_RIGHT, size::MEDIUM)),
            );
            if next.clicked() {
                app.set_table_page(page.page + 1);
            }
            ui.label(format!("Page {} of {}", page.page, page.page_count.max(1)));
            let prev = ui.add_enabled(
                page.page > 1,
                egui::Button::new(Icons::icon(material::CHEVRON_LEFT, size::MEDIUM)),
            );
            if prev.clicked() {
                app.set_table_page(page.page - 1);
            }

            ui.add_space(16.0);
            let mut page_size = page.page_size;
            egui::ComboBox::from_id_salt("table_page_size")
                .selected_text(page_size.to_string())
                .show_ui(ui, |ui| {
                    for size in PAGE_SIZE_OPTIONS {
                        ui.selectable_value(&mut page_size, size, size.to_string());
                    }
                });
            ui.label("Rows per page");
            if page_size != page.page_size {
                app.set_table_page_size(page_size);
            }
        });
    });
}
