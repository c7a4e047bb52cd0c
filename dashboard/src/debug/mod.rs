//! # Logging Infrastructure
//!
//! File-based structured logging for the dashboard.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/dashboard.log` with daily rotation
//! - **Env filter**: `RUST_LOG` directives, default `dashboard=info,warn`
//! - **Panic capture**: panics are written to the log before the process aborts
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `dashboard=debug,info`)
//! - `FLUX_LOG_DIR`: Log directory (default: `logs`)
//! - `FLUX_LOG_STDERR`: Also log to stderr (1=on)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init as init_logger;

/// Initialize logging. Call once at startup, before anything logs.
pub fn init() {
    init_logger();
}
