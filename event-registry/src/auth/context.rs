//! Request context handed to the services

use axum::extract::FromRequestParts;
use http::request::Parts;

use super::{CurrentUser, Permission};

/// Per-request caller identity
///
/// Built from the [`CurrentUser`] the auth middleware attached. A request
/// without one (or with a non-numeric subject) yields an anonymous context,
/// which the shop service rejects before touching storage.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub active_user_id: Option<i64>,
    pub role: Option<String>,
    pub permissions: Vec<Permission>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: i64) -> Self {
        Self {
            active_user_id: Some(user_id),
            role: None,
            permissions: vec![Permission::Authenticated],
        }
    }

    /// Label for log lines
    pub fn actor(&self) -> String {
        self.active_user_id
            .map_or_else(|| "anonymous".to_string(), |id| id.to_string())
    }
}

impl From<&CurrentUser> for RequestContext {
    fn from(user: &CurrentUser) -> Self {
        Self {
            active_user_id: user.user_id(),
            role: Some(user.role.clone()),
            permissions: user.permissions.clone(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .map(RequestContext::from)
            .unwrap_or_default())
    }
}
