//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the upstream market-data API.
//!
//! ## Module Organization
//!
//! - [`market`] - Coins, global market statistics and historical price points
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case, identical to the upstream JSON
//! - **Optional fields**: `None` when the upstream omits them or sends `null`
//! - **All types**: Implement both `Serialize` and `Deserialize`
//!
//! ## Example JSON
//!
//! ```text
//! GET /coins/markets?vs_currency=inr
//!
//! [
//!   {
//!     "id": "bitcoin",
//!     "symbol": "btc",
//!     "name": "Bitcoin",
//!     "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
//!     "current_price": 5712345.0,
//!     "market_cap": 112345678901234.0,
//!     "market_cap_rank": 1,
//!     "total_volume": 2345678901234.0,
//!     "high_24h": 5800000.0,
//!     "low_24h": 5600000.0,
//!     "price_change_percentage_24h": -1.2345
//!   }
//! ]
//! ```

pub mod market;

pub use market::*;
