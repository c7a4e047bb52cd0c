//! # Shared Market Data Library
//!
//! This library defines the contract between the dashboard and the upstream
//! market-data REST API. It holds no I/O: only wire types, payload validation
//! and display formatting, so every consumer shapes data the same way.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::market`]**: Coins, global market snapshot and price points
//! - **[`validate`]**: Schema validation of raw JSON payloads into [`dto`] types
//! - **[`utils`]**: Number formatting helpers
//!   - **[`utils::format_currency`]**: Currency symbol plus grouped digits
//!   - **[`utils::format_compact`]**: Compact notation (`2.5T`)
//!   - **[`utils::format_signed_percent`]**: Sign-prefixed percentages
//!
//! ## Validation First
//!
//! Responses are decoded into [`serde_json::Value`] and narrowed by the
//! functions in [`validate`], so a failure names the offending element and
//! field:
//!
//! ```rust
//! use shared::validate::validate_coin_list;
//! use serde_json::json;
//!
//! let payload = json!([
//!     { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "current_price": 5_000_000.0 }
//! ]);
//!
//! let list = validate_coin_list(&payload).unwrap();
//! assert_eq!(list.coins[0].name, "Bitcoin");
//! assert_eq!(list.coins[0].price_change_percentage_24h, 0.0);
//! ```

pub mod dto;
pub mod utils;
pub mod validate;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
pub use validate::{SchemaError, CoinList};
