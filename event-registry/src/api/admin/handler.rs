//! Admin Registration Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::list::{ListOptions, PaginatedList, parse_relations};
use shared::models::{
    CreateRegistrationInput, CustomerEventRegistration, DeletionResponse, RegistrationExportRow,
    UpdateRegistrationInput,
};

use crate::auth::RequestContext;
use crate::error::ServiceError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ServiceError>;

#[derive(Debug, Default, Deserialize)]
pub struct RelationsQuery {
    pub relations: Option<String>,
}

/// GET /admin-api/event-registrations - paginated list
pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(opts): Query<ListOptions>,
) -> ApiResult<PaginatedList<CustomerEventRegistration>> {
    let mut conn = state.pool.acquire().await?;
    let page = state.admin.find_all(&ctx, &mut conn, &opts).await?;
    Ok(Json(page))
}

/// GET /admin-api/event-registrations/{id} - record or null
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
    Query(query): Query<RelationsQuery>,
) -> ApiResult<Option<CustomerEventRegistration>> {
    let relations = parse_relations(query.relations.as_deref().unwrap_or_default())?;
    let mut conn = state.pool.acquire().await?;
    let registration = state.admin.find_one(&ctx, &mut conn, id, &relations).await?;
    Ok(Json(registration))
}

/// GET /admin-api/event-registrations/export - flattened rows
pub async fn export(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Vec<RegistrationExportRow>> {
    let mut conn = state.pool.acquire().await?;
    let rows = state.admin.export(&ctx, &mut conn).await?;
    Ok(Json(rows))
}

/// POST /admin-api/event-registrations - create for any customer
pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<CreateRegistrationInput>,
) -> ApiResult<CustomerEventRegistration> {
    let mut tx = state.writer.begin().await?;
    let registration = state.admin.create(&ctx, &mut tx, payload).await?;
    tx.commit().await?;
    Ok(Json(registration))
}

/// PUT /admin-api/event-registrations - patch by id
pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(payload): Json<UpdateRegistrationInput>,
) -> ApiResult<CustomerEventRegistration> {
    let mut tx = state.writer.begin().await?;
    let registration = state.admin.update(&ctx, &mut tx, payload).await?;
    tx.commit().await?;
    Ok(Json(registration))
}

/// DELETE /admin-api/event-registrations/{id} - deletion outcome
pub async fn delete(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i64>,
) -> ApiResult<DeletionResponse> {
    let mut tx = state.writer.begin().await?;
    let outcome = state.admin.delete(&ctx, &mut tx, id).await?;
    tx.commit().await?;
    Ok(Json(outcome))
}
