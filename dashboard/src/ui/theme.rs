//! # GUI Theme
//!
//! Dashboard themes: slate (dark) or paper (light) panels, violet accent,
//! green/red for price direction. egui follows the system theme until the
//! header toggle picks one.

use egui::{Color32, Context, CornerRadius, Stroke, Visuals};
use egui::Theme as EguiTheme;

/// Dashboard color palette
#[derive(Debug, Clone)]
pub struct Palette {
    /// Window background
    pub background: Color32,
    /// Card/panel background
    pub card: Color32,
    /// Primary text
    pub text: Color32,
    /// Violet accent (selection, active toggles)
    pub accent: Color32,
    /// Card borders
    pub border: Color32,
    /// Secondary text
    pub muted: Color32,
    /// Gains
    pub green: Color32,
    /// Losses and errors
    pub red: Color32,
    /// Skeleton placeholders
    pub skeleton: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::dark()
    }
}

impl Palette {
    pub fn dark() -> Self {
        Palette {
            background: Color32::from_rgb(15, 17, 26),   // #0F111A
            card: Color32::from_rgb(24, 27, 40),         // #181B28
            text: Color32::from_rgb(234, 236, 244),      // #EAECF4
            accent: Color32::from_rgb(139, 92, 246),     // #8B5CF6
            border: Color32::from_rgb(44, 48, 66),       // #2C3042
            muted: Color32::from_rgb(138, 143, 163),     // #8A8FA3
            green: Color32::from_rgb(34, 197, 94),       // #22C55E
            red: Color32::from_rgb(239, 68, 68),         // #EF4444
            skeleton: Color32::from_rgb(36, 40, 56),     // #242838
        }
    }

    pub fn light() -> Self {
        Palette {
            background: Color32::from_rgb(244, 245, 249), // #F4F5F9
            card: Color32::from_rgb(255, 255, 255),       // #FFFFFF
            text: Color32::from_rgb(23, 25, 35),          // #171923
            accent: Color32::from_rgb(124, 58, 237),      // #7C3AED
            border: Color32::from_rgb(221, 224, 234),     // #DDE0EA
            muted: Color32::from_rgb(100, 106, 125),      // #646A7D
            green: Color32::from_rgb(22, 163, 74),        // #16A34A
            red: Color32::from_rgb(220, 38, 38),          // #DC2626
            skeleton: Color32::from_rgb(229, 231, 239),   // #E5E7EF
        }
    }
}

/// Application theme
pub struct Theme {
    pub mode: EguiTheme,
    pub colors: Palette,
    /// Normal text color
    pub normal: Color32,
    /// Selected/highlighted items
    pub selected: Color32,
    /// Dimmed/secondary text
    pub dim: Color32,
    /// Error messages
    pub error: Color32,
    /// Price up
    pub price_up: Color32,
    /// Price down
    pub price_down: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::for_mode(EguiTheme::Dark)
    }
}

impl Theme {
    pub fn for_mode(mode: EguiTheme) -> Self {
        let colors = match mode {
            EguiTheme::Dark => Palette::dark(),
            EguiTheme::Light => Palette::light(),
        };
        Theme {
            mode,
            normal: colors.text,
            selected: colors.accent,
            dim: colors.muted,
            error: colors.red,
            price_up: colors.green,
            price_down: colors.red,
            colors,
        }
    }

    /// Theme matching what egui is rendering right now.
    pub fn current(ctx: &Context) -> Self {
        Theme::for_mode(ctx.theme())
    }

    /// Mode the header toggle switches to.
    pub fn toggled(mode: EguiTheme) -> EguiTheme {
        match mode {
            EguiTheme::Dark => EguiTheme::Light,
            EguiTheme::Light => EguiTheme::Dark,
        }
    }

    /// Color for a change whose sign was already decided on the numeric value.
    pub fn change_color(&self, is_negative: bool) -> Color32 {
        if is_negative {
            self.price_down
        } else {
            self.price_up
        }
    }

    /// Arrow matching the change direction.
    pub fn change_arrow(is_negative: bool) -> &'static str {
        if is_negative {
            "▼"
        } else {
            "▲"
        }
    }

    /// Frame used by every dashboard card.
    pub fn card_frame(&self) -> egui::Frame {
        egui::Frame::new()
            .fill(self.colors.card)
            .stroke(Stroke::new(1.0, self.colors.border))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(egui::Margin::same(12))
    }

    pub fn visuals(&self) -> Visuals {
        let colors = &self.colors;
        let mut visuals = self.mode.default_visuals();

        visuals.override_text_color = Some(colors.text);
        visuals.panel_fill = colors.background;
        visuals.window_fill = colors.card;
        visuals.window_stroke = Stroke::new(1.0, colors.border);
        visuals.extreme_bg_color = colors.background;
        visuals.faint_bg_color = colors.skeleton;

        visuals.widgets.inactive.weak_bg_fill = colors.skeleton;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.border);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, colors.accent);
        visuals.widgets.active.bg_stroke = Stroke::new(1.5, colors.accent);

        visuals.selection.bg_fill = colors.accent.linear_multiply(0.4);
        visuals.selection.stroke = Stroke::new(1.0, colors.accent);
        visuals.hyperlink_color = colors.accent;

        visuals
    }

    /// Style both egui themes; the active one is picked by the theme preference.
    pub fn apply(ctx: &Context) {
        for mode in [EguiTheme::Dark, EguiTheme::Light] {
            let visuals = Theme::for_mode(mode).visuals();
            ctx.style_mut_of(mode, |style| {
                style.visuals = visuals;
                style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
                style.spacing.button_padding = egui::Vec2::new(10.0, 4.0);
            });
        }
        tracing::debug!("Applied dashboard theme");
    }

    /// Pin the theme, replacing the system preference.
    pub fn set_mode(ctx: &Context, mode: EguiTheme) {
        ctx.set_theme(mode);
        tracing::info!(?mode, "Theme changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Theme Mode Tests ==========

    #[test]
    fn test_modes_use_their_own_palette() {
        let dark = Theme::for_mode(EguiTheme::Dark);
        let light = Theme::for_mode(EguiTheme::Light);

        assert_ne!(dark.colors.background, light.colors.background);
        assert_ne!(dark.normal, light.normal);
        assert_eq!(dark.colors.background, Palette::default().background);
    }

    #[test]
    fn test_visuals_follow_mode() {
        let dark = Theme::for_mode(EguiTheme::Dark).visuals();
        let light = Theme::for_mode(EguiTheme::Light).visuals();

        assert!(dark.dark_mode);
        assert!(!light.dark_mode);
        assert_eq!(light.panel_fill, Palette::light().background);
        assert_eq!(light.override_text_color, Some(Palette::light().text));
    }

    #[test]
    fn test_toggle_flips_mode() {
        assert_eq!(Theme::toggled(EguiTheme::Dark), EguiTheme::Light);
        assert_eq!(Theme::toggled(EguiTheme::Light), EguiTheme::Dark);
    }

    #[test]
    fn test_apply_styles_each_mode_and_toggle_switches() {
        let ctx = Context::default();
        Theme::apply(&ctx);

        Theme::set_mode(&ctx, EguiTheme::Light);
        assert_eq!(ctx.theme(), EguiTheme::Light);
        assert_eq!(ctx.style().visuals.panel_fill, Palette::light().background);

        Theme::set_mode(&ctx, Theme::toggled(ctx.theme()));
        assert_eq!(ctx.theme(), EguiTheme::Dark);
        assert_eq!(ctx.style().visuals.panel_fill, Palette::dark().background);
    }
}
