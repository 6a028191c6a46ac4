//! Shop Registration Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::list::{ListOptions, PaginatedList, parse_relations};
use shared::models::{
    CustomerEventRegistration, ShopCreateRegistrationInput, ShopUpdateRegistrationInput,
};

use crate::auth::RequestContext;
use crate::error::ServiceError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ServiceError>;

#[derive(Debug, Default, Deserialize)]
pub struct RelationsQuery {
    pub relations: Option<String>,
}

/// GET /shop-api/event-registrations - caller's registrations
pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(opts): Query<ListOptions>,
) -> ApiResult<PaginatedList<CustomerEventRegistration>> {
    let mut conn = state.pool.acquire().await?;
    let page = state.shop.find_all_for_customer(&ctx, &mut conn, &opts).await?;
    Ok(Json(page))
}

/// GET /shop-api/event-registrations/{id} - own record or null
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    Query(query): Query<RelationsQuery>,
) -> ApiResult<Option<CustomerEventRegistration>> {
    let relations = query.relations.as_deref().map(parse_relations).transpose()?;
    let mut conn = state.pool.acquire().await?;
    let registration = state
        .shop
        .find_one(&ctx, &mut conn, id, relations.as_deref())
        .await?;
    Ok(Json(registration))
}

/// GET /shop-api/event-registrations/by-code/{code} - own record or null
pub async fn get_by_code(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(code): Path<String>,
) -> ApiResult<Option<CustomerEventRegistration>> {
    let mut conn = state.pool.acquire().await?;
    let registration = state.shop.find_by_event_code(&ctx, &mut conn, &code).await?;
    Ok(Json(registration))
}

/// GET /shop-api/event-registrations/registered/{code}
pub async fn is_registered(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(code): Path<String>,
) -> ApiResult<bool> {
    let mut conn = state.pool.acquire().await?;
    let registered = state.shop.is_registered(&ctx, &mut conn, &code).await?;
    Ok(Json(registered))
}

/// POST /shop-api/event-registrations - register the caller
pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<ShopCreateRegistrationInput>,
) -> ApiResult<CustomerEventRegistration> {
    let mut tx = state.writer.begin().await?;
    let registration = state.shop.create(&ctx, &mut tx, payload).await?;
    tx.commit().await?;
    Ok(Json(registration))
}

/// PUT /shop-api/event-registrations - patch own registration
pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<ShopUpdateRegistrationInput>,
) -> ApiResult<CustomerEventRegistration> {
    let mut tx = state.writer.begin().await?;
    let registration = state.shop.update(&ctx, &mut tx, payload).await?;
    tx.commit().await?;
    Ok(Json(registration))
}

/// DELETE /shop-api/event-registrations/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> ApiResult<bool> {
    let mut tx = state.writer.begin().await?;
    let deleted = state.shop.delete(&ctx, &mut tx, id).await?;
    tx.commit().await?;
    Ok(Json(deleted))
}
