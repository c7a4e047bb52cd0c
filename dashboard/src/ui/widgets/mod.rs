//! # Reusable UI Widgets
//!
//! Dashboard panels and the small helpers they share.

pub mod coin_picker;
pub mod header;
pub mod icons;
pub mod market_summary;
pub mod notifications;
pub mod overview;
pub mod price_strip;
pub mod status;
