//! Authentication and authorization
//!
//! - [`JwtService`] - bearer token verification
//! - [`CurrentUser`] - caller parsed from claims
//! - [`require_auth`] / [`require_permission`] - middleware guards
//! - [`RequestContext`] - identity handed to the services
//! - [`CustomerScope`] - ownership predicate for shop queries

pub mod context;
pub mod jwt;
pub mod middleware;
pub mod permissions;
pub mod scope;

pub use context::RequestContext;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
pub use permissions::Permission;
pub use scope::CustomerScope;
