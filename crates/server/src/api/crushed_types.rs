//! Crushed-type CRUD endpoints (ice texture options).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use orderdesk_core::model::CrushedType;

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

const CRUSHED_TYPE_COLUMNS: &str = "id, name, description, active, created_at";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCrushedTypeRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCrushedTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

fn default_active() -> bool {
    true
}

#[utoipa::path(
    get,
    path = "/crushed-types",
    tag = "Catalog",
    responses((status = 200, description = "All crushed types", body = [CrushedType]))
)]
pub async fn crushed_types_list(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CrushedType>>> {
    let rows = sqlx::query_as::<_, CrushedType>(&format!(
        "SELECT {} FROM crushed_types ORDER BY name",
        CRUSHED_TYPE_COLUMNS
    ))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/crushed-types",
    tag = "Catalog",
    request_body = CreateCrushedTypeRequest,
    responses(
        (status = 201, description = "Crushed type created", body = CrushedType),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn crushed_types_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCrushedTypeRequest>,
) -> ApiResult<(StatusCode, Json<CrushedType>)> {
    if req.name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }

    let row = sqlx::query_as::<_, CrushedType>(&format!(
        "INSERT INTO crushed_types (name, description, active) VALUES ($1, $2, $3)
         RETURNING {}",
        CRUSHED_TYPE_COLUMNS
    ))
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.active)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/crushed-types/{id}",
    tag = "Catalog",
    responses(
        (status = 200, description = "Crushed type", body = CrushedType),
        (status = 404, description = "No such crushed type", body = ErrorResponse)
    )
)]
pub async fn crushed_types_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CrushedType>> {
    let row = sqlx::query_as::<_, CrushedType>(&format!(
        "SELECT {} FROM crushed_types WHERE id = $1",
        CRUSHED_TYPE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("CrushedType", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    put,
    path = "/crushed-types/{id}",
    tag = "Catalog",
    request_body = UpdateCrushedTypeRequest,
    responses(
        (status = 200, description = "Updated crushed type", body = CrushedType),
        (status = 404, description = "No such crushed type", body = ErrorResponse)
    )
)]
pub async fn crushed_types_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCrushedTypeRequest>,
) -> ApiResult<Json<CrushedType>> {
    let row = sqlx::query_as::<_, CrushedType>(&format!(
        "UPDATE crushed_types SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            active = COALESCE($4, active)
         WHERE id = $1
         RETURNING {}",
        CRUSHED_TYPE_COLUMNS
    ))
    .bind(id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.active)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("CrushedType", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/crushed-types/{id}",
    tag = "Catalog",
    responses(
        (status = 204, description = "Crushed type deleted"),
        (status = 404, description = "No such crushed type", body = ErrorResponse)
    )
)]
pub async fn crushed_types_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let result = sqlx::query("DELETE FROM crushed_types WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("CrushedType", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
