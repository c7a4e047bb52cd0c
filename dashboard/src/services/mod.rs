//! # Services Module
//!
//! Everything that talks to the outside world or caches what came back.
//!
//! ```text
//! services/
//! ├── api/            - HTTP client for the market-data API
//! ├── query_cache.rs  - Deduplicating cache with staleness window
//! ├── queries.rs      - One cache per data kind, bound to the API calls
//! └── export.rs       - CSV serialization and file output
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────────┐   JSON    ┌───────────────┐  typed   ┌───────────────┐
//! │ Market API   │──────────►│ ApiClient     │─────────►│ MarketQueries │──► app tasks
//! │ (CoinGecko)  │           │ + validation  │          │ (QueryCache)  │
//! └──────────────┘           └───────────────┘          └───────────────┘
//! ```

pub mod api;
pub mod export;
pub mod queries;
pub mod query_cache;

pub use queries::MarketQueries;
pub use query_cache::{QueryCache, QuerySnapshot, QueryStatus};
