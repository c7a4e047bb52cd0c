//! # Market Data API Client Module
//!
//! HTTP client for the upstream market-data REST API.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports and documentation
//! ├── client.rs   - ApiClient struct, retry policy and JSON transport
//! └── market.rs   - Coin list, global snapshot and price series endpoints
//! ```
//!
//! ## Endpoints
//!
//! ```text
//! GET {base}/coins/markets?vs_currency=inr&order=market_cap_desc&per_page=100&page=1
//! GET {base}/global
//! GET {base}/coins/{id}/market_chart?vs_currency=inr&days=30
//! ```
//!
//! Errors are typed ([`crate::core::AppError`]): transport failures and 5xx/429
//! responses are retried a bounded number of times, everything else fails fast.

pub mod client;
pub mod market;

pub use client::ApiClient;
pub use market::*;
