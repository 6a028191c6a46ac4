//! HTTP API
//!
//! - `/health` - public health check
//! - `/admin-api/event-registrations` - ReadCatalog / UpdateCatalog
//! - `/shop-api/event-registrations` - any authenticated customer

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::state::AppState;

pub mod admin;
pub mod health;
pub mod middleware;
pub mod shop;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Register every route; admin and shop routes sit behind `require_auth`
pub fn build_router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(admin::router())
        .merge(shop::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new().merge(health::router()).merge(protected)
}

/// Fully configured application, used by the server and by oneshot tests
pub fn build_app(state: AppState) -> Router {
    build_router(&state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
