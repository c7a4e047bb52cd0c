//! # Event Handlers
//!
//! User action handlers organized by panel. Each takes the shared state,
//! holds the lock only for the mutation, and returns what the caller must
//! fetch (if anything).

pub mod chart;
pub mod shell;
pub mod table;
