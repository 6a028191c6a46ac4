//! Shop registration API
//!
//! Any valid token may call these routes; the service scopes every
//! operation to the caller's customer profile.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Permission, require_permission};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/shop-api/event-registrations", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .put(handler::update),
        )
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/by-code/{code}", get(handler::get_by_code))
        .route("/registered/{code}", get(handler::is_registered))
        .layer(middleware::from_fn(require_permission(Permission::Authenticated)))
}
