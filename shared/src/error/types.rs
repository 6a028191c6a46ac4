//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type every handler returns, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a registration not found error carrying the requested id
    pub fn registration_not_found(id: i64) -> Self {
        Self::new(ErrorCode::RegistrationNotFound).with_detail("id", id)
    }

    /// Create a forbidden/permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create a not authenticated error
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }
}

/// Error response body
///
/// Successful handlers return their payload directly; every error response
/// carries this body:
/// - `code`: numeric [`ErrorCode`]
/// - `message`: human-readable message
/// - `details`: structured context (e.g. the offending `field`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorResponse::from(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::RegistrationNotFound);
        assert_eq!(err.code, ErrorCode::RegistrationNotFound);
        assert_eq!(err.message, "Registration not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("title must not be empty")
            .with_detail("field", "title")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "title");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_registration_not_found_carries_id() {
        let err = AppError::registration_not_found(42);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details.unwrap().get("id").unwrap(), 42);
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::forbidden("nope").code, ErrorCode::PermissionDenied);
        assert_eq!(AppError::unauthorized().code, ErrorCode::NotAuthenticated);
        assert_eq!(AppError::token_expired().code, ErrorCode::TokenExpired);
        assert_eq!(AppError::invalid_token("bad").code, ErrorCode::TokenInvalid);
        assert_eq!(AppError::database("boom").code, ErrorCode::DatabaseError);
        assert_eq!(AppError::invalid("json").code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_error_response_body() {
        let err = AppError::forbidden("Permission denied").with_detail("id", "123");
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(json["code"], 2001);
        assert_eq!(json["message"], "Permission denied");
        assert_eq!(json["details"]["id"], "123");
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let json = serde_json::to_string(&ErrorResponse::from(&AppError::unauthorized())).unwrap();
        assert!(json.contains("\"code\":1001"));
        assert!(!json.contains("details"));
    }
}
