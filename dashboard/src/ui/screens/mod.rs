//! # Screens
//!
//! - [`dashboard`]: the single dashboard page
//! - [`table_dialog`]: full market table window with CSV export

pub mod dashboard;
pub mod table_dialog;
