//! Shared types for the event registry
//!
//! Common types used by the server and its API clients: error codes and
//! response envelopes, registration models, list options, and ID helpers.

pub mod error;
pub mod list;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use list::{ListOptions, PaginatedList, Relation, RegistrationSortField, SortOrder};
