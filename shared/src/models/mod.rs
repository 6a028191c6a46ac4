//! Data models
//!
//! Shared between the registry server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod customer;
pub mod registration;

// Re-exports
pub use customer::*;
pub use registration::*;
