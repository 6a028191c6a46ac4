//! Admin registration API
//!
//! Unrestricted CRUD over every customer's registrations.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Permission, require_permission};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/admin-api/event-registrations", routes())
}

fn routes() -> Router<AppState> {
    // Reads: ReadCatalog
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/export", get(handler::export))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(Permission::ReadCatalog)));

    // Writes: UpdateCatalog
    let manage_routes = Router::new()
        .route("/", post(handler::create).put(handler::update))
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(Permission::UpdateCatalog)));

    read_routes.merge(manage_routes)
}
