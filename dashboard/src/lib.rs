//! # Crypto Flux - Library Root
//!
//! A **native desktop dashboard** for cryptocurrency market data, built on
//! egui. This library crate holds every module used by the binary
//! (`main.rs`); everything except [`ui`] can be driven without a window.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              dashboard (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  egui / eframe  - Immediate-mode GUI + native window   │
//! │  egui_plot      - Price chart                          │
//! │  egui_extras    - Market table                         │
//! │  Tokio          - Async runtime                        │
//! │  Reqwest        - HTTP client                          │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTPS (JSON)
//!          ▼
//! ┌─────────────────────────┐
//! │  CoinGecko v3 REST API  │
//! └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **core**: configuration, error type, the [`core::MarketDataService`] seam
//! - **services**: HTTP client with validation, query caches, CSV export
//! - **app**: orchestrator, UI state machines (chart, table, shell), view models
//! - **ui**: egui panels and the table dialog
//! - **debug**: file-based `tracing` setup
//! - **utils**: the shared Tokio runtime
//!
//! ```text
//! main.rs
//!   │
//!   ├── app (state, events, tasks, handlers)
//!   │   ├── services::queries (QueryCache per data kind)
//!   │   │   └── services::api (HTTP + shared::validate)
//!   │   └── services::export (CSV)
//!   │
//!   └── ui (rendering; reads snapshots, calls App methods)
//! ```
//!
//! ## Testing
//!
//! The app can be built on a stub service:
//!
//! ```rust,no_run
//! use dashboard::app::App;
//! use dashboard::core::DashboardConfig;
//! use dashboard::services::api::ApiClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = Arc::new(ApiClient::with_base_url("http://localhost:8080"));
//!     let mut app = App::with_service(api, &DashboardConfig::default());
//!     app.on_tick();
//! }
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::{App, AppEvent, AppState};
pub use core::{AppError, Result};
