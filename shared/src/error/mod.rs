//! Unified error system for the event registry
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorResponse`]: JSON body of every error response
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Customer errors
//! - 4xxx: Registration errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorResponse};
//!
//! let err = AppError::new(ErrorCode::RegistrationNotFound);
//!
//! let err = AppError::validation("code must not be empty")
//!     .with_detail("field", "code");
//!
//! let body = ErrorResponse::from(&err);
//! assert_eq!(body.code, ErrorCode::ValidationFailed);
//! assert_eq!(err.http_status(), shared::http::StatusCode::BAD_REQUEST);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorResponse};
