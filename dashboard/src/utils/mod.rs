//! # Utility Functions
//!
//! - **[`runtime`]**: The shared Tokio runtime background tasks run on
//!
//! Number formatting lives in [`shared::utils`].

pub mod runtime;
