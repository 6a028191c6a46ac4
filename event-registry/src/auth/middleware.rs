//! Authentication middleware
//!
//! Axum middleware for JWT authentication and permission guards.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService, Permission};
use crate::security_log;
use crate::state::AppState;

/// Authentication middleware - requires a valid bearer token
///
/// Validates `Authorization: Bearer <token>` and inserts [`CurrentUser`] into
/// the request extensions. CORS preflight requests pass through untouched.
///
/// | Failure | Status |
/// |---------|--------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Anything else | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!(WARN, "auth_missing", uri = %req.uri());
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(WARN, "auth_failed", error = %e, uri = %req.uri());
            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Permission guard - requires one permission class
///
/// Must run after [`require_auth`].
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/admin-api/event-registrations", get(handler::list))
///     .route_layer(middleware::from_fn(require_permission(Permission::ReadCatalog)));
/// ```
pub fn require_permission(
    permission: Permission,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_permission(permission) {
                security_log!(
                    WARN,
                    "permission_denied",
                    user_id = %user.id,
                    role = %user.role,
                    required_permission = %permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
