//! # Coin Picker Widget
//!
//! Searchable combobox selecting the charted coin.

use crate::app::view_models::{to_combobox_option, CoinOption};
use crate::app::App;
use crate::ui::theme::Theme;
use shared::Coin;

/// Options whose label or symbol contains `filter` (case-insensitive).
pub fn filter_options(options: Vec<CoinOption>, filter: &str) -> Vec<CoinOption> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return options;
    }
    options
        .into_iter()
        .filter(|o| o.label.to_lowercase().contains(&needle) || o.symbol.to_lowercase().contains(&needle))
        .collect()
}

pub fn render_coin_picker(
    ui: &mut egui::Ui,
    app: &mut App,
    coins: &[Coin],
    selected: Option<&str>,
    currency: &str,
) {
    let theme = Theme::current(ui.ctx());
    let options: Vec<CoinOption> = coins.iter().map(|c| to_combobox_option(c, currency)).collect();
    let selected_text = selected
        .and_then(|id| options.iter().find(|o| o.value == id))
        .map(|o| format!("{} ({})", o.label, o.symbol))
        .unwrap_or_else(|| "Select coin".to_string());

    // Persist the filter text across frames
    let filter_id = ui.make_persistent_id("coin_picker_filter");
    let mut filter: String = ui.memory_mut(|m| m.data.get_temp(filter_id).unwrap_or_default());

    egui::ComboBox::from_id_salt("coin_picker")
        .selected_text(selected_text)
        .width(220.0)
        .height(320.0)
        .show_ui(ui, |ui| {
            ui.add(egui::TextEdit::singleline(&mut filter).hint_text("Search coin..."));
            ui.separator();

            let visible = filter_options(options, &filter);
            if visible.is_empty() {
                ui.colored_label(theme.dim, "No coins found");
                return;
            }
            for option in visible {
                let is_selected = selected == Some(option.value.as_str());
                let label = format!("{}  {}", option.label, option.symbol);
                if ui.selectable_label(is_selected, label).clicked() && !is_selected {
                    app.select_coin(&option.value);
                }
            }
        });

    ui.memory_mut(|m| m.data.insert_temp(filter_id, filter));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view_models::tests::coin;

    #[test]
    fn test_filter_by_label_or_symbol() {
        let coins = [
            coin("bitcoin", "Bitcoin", 1, 1.0, 0.0),
            coin("ethereum", "Ethereum", 2, 1.0, 0.0),
        ];
        let options: Vec<_> = coins.iter().map(|c| to_combobox_option(c, "usd")).collect();

        assert_eq!(filter_options(options.clone(), "").len(), 2);
        assert_eq!(filter_options(options.clone(), "ETH")[0].value, "ethereum");
        assert!(filter_options(options, "doge").is_empty());
    }
}
