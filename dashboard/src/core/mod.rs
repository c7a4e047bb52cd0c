//! # Core Abstractions
//!
//! Error type, configuration and service traits shared by every layer of the
//! dashboard.
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`config`]**: Runtime configuration (`DashboardConfig`)
//! - **[`service`]**: Service trait for dependency injection (`MarketDataService`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashboard::core::{DashboardConfig, MarketDataService};
//! use dashboard::services::api::ApiClient;
//!
//! // In production: the live HTTP client
//! let api: Arc<dyn MarketDataService> = Arc::new(ApiClient::new(&DashboardConfig::from_env()));
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::DashboardConfig;
pub use error::{AppError, Result};
pub use service::MarketDataService;
