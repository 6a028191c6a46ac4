//! Unified service-layer error type
//!
//! `ServiceError` bridges storage errors (`sqlx::Error`, [`RepoError`]) and the
//! API-layer error (`AppError`), so handlers and services can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::repository::RepoError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: storage/infrastructure errors (logged, mapped to DatabaseError)
/// - `App`: business-rule errors (passed through to the client unchanged)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Db(e) => write!(f, "{e}"),
            ServiceError::App(e) => write!(f, "{e}"),
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => {
                ServiceError::App(AppError::with_message(ErrorCode::NotFound, msg))
            }
            RepoError::Duplicate(msg) => {
                ServiceError::App(AppError::with_message(ErrorCode::AlreadyExists, msg))
            }
            RepoError::Database(_) => ServiceError::Db(e.into()),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_errors_map_to_app_codes() {
        let app: AppError = ServiceError::from(RepoError::NotFound("x".into())).into();
        assert_eq!(app.code, ErrorCode::NotFound);

        let app: AppError = ServiceError::from(RepoError::Duplicate("x".into())).into();
        assert_eq!(app.code, ErrorCode::AlreadyExists);

        let app: AppError = ServiceError::from(RepoError::Database("disk I/O".into())).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.message, "Database error");
    }

    #[test]
    fn test_app_error_passes_through() {
        let app: AppError = ServiceError::from(AppError::registration_not_found(9)).into();
        assert_eq!(app.code, ErrorCode::RegistrationNotFound);
    }
}
