//! # Icons Helper Module
//!
//! Material Design icon glyphs. The font is registered at startup by
//! [`initialize_material_icons`].

use egui::{Color32, RichText};

/// Icon size constants
pub mod size {
    pub const SMALL: f32 = 14.0;
    pub const MEDIUM: f32 = 20.0;
    pub const LARGE: f32 = 28.0;
}

/// Material Design Icons
pub mod material {
    /// Chart/Graph icon
    pub const CHART: &str = "\u{e24b}"; // show_chart
    /// Refresh icon
    pub const REFRESH: &str = "\u{e5d5}"; // refresh
    /// Search icon
    pub const SEARCH: &str = "\u{e8b6}"; // search
    /// Theme toggle icons
    pub const DARK_MODE: &str = "\u{e51c}"; // dark_mode
    pub const LIGHT_MODE: &str = "\u{e518}"; // light_mode
    /// Error icon
    pub const ERROR: &str = "\u{e000}"; // error
    /// Download icon
    pub const DOWNLOAD: &str = "\u{f090}"; // download
    /// Table icon
    pub const TABLE: &str = "\u{e265}"; // table_chart
    /// Globe icon
    pub const PUBLIC: &str = "\u{e80b}"; // public
    /// Arrow right icon
    pub const ARROW_RIGHT: &str = "\u{e5c8}"; // arrow_forward
    /// Chevron left/right for pagination
    pub const CHEVRON_LEFT: &str = "\u{e5cb}"; // chevron_left
    pub const CHEVRON_RIGHT: &str = "\u{e5cc}"; // chevron_right
}

/// Icon helper functions
pub struct Icons;

impl Icons {
    pub fn icon(icon: &str, size: f32) -> RichText {
        RichText::new(icon).size(size)
    }

    pub fn icon_color(icon: &str, size: f32, color: Color32) -> RichText {
        RichText::new(icon).size(size).color(color)
    }
}

/// Register the Material Icons font with egui.
pub fn initialize_material_icons(ctx: &egui::Context) {
    egui_material_icons::initialize(ctx);
}
