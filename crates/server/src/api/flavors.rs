//! Flavor CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use orderdesk_core::model::Flavor;

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

const FLAVOR_COLUMNS: &str = "id, name, category_id, active, created_at";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFlavorRequest {
    pub name: String,
    pub category_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFlavorRequest {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub active: Option<bool>,
}

fn default_active() -> bool {
    true
}

#[utoipa::path(
    get,
    path = "/flavors",
    tag = "Catalog",
    responses((status = 200, description = "All flavors", body = [Flavor]))
)]
pub async fn flavors_list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Flavor>>> {
    let rows = sqlx::query_as::<_, Flavor>(&format!(
        "SELECT {} FROM flavors ORDER BY name",
        FLAVOR_COLUMNS
    ))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/flavors",
    tag = "Catalog",
    request_body = CreateFlavorRequest,
    responses(
        (status = 201, description = "Flavor created", body = Flavor),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn flavors_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFlavorRequest>,
) -> ApiResult<(StatusCode, Json<Flavor>)> {
    if req.name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }

    let row = sqlx::query_as::<_, Flavor>(&format!(
        "INSERT INTO flavors (name, category_id, active) VALUES ($1, $2, $3)
         RETURNING {}",
        FLAVOR_COLUMNS
    ))
    .bind(&req.name)
    .bind(req.category_id)
    .bind(req.active)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/flavors/{id}",
    tag = "Catalog",
    responses(
        (status = 200, description = "Flavor", body = Flavor),
        (status = 404, description = "No such flavor", body = ErrorResponse)
    )
)]
pub async fn flavors_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Flavor>> {
    let row = sqlx::query_as::<_, Flavor>(&format!(
        "SELECT {} FROM flavors WHERE id = $1",
        FLAVOR_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Flavor", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    put,
    path = "/flavors/{id}",
    tag = "Catalog",
    request_body = UpdateFlavorRequest,
    responses(
        (status = 200, description = "Updated flavor", body = Flavor),
        (status = 404, description = "No such flavor", body = ErrorResponse)
    )
)]
pub async fn flavors_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFlavorRequest>,
) -> ApiResult<Json<Flavor>> {
    let row = sqlx::query_as::<_, Flavor>(&format!(
        "UPDATE flavors SET
            name = COALESCE($2, name),
            category_id = COALESCE($3, category_id),
            active = COALESCE($4, active)
         WHERE id = $1
         RETURNING {}",
        FLAVOR_COLUMNS
    ))
    .bind(id)
    .bind(&req.name)
    .bind(req.category_id)
    .bind(req.active)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Flavor", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/flavors/{id}",
    tag = "Catalog",
    responses(
        (status = 204, description = "Flavor deleted"),
        (status = 404, description = "No such flavor", body = ErrorResponse)
    )
)]
pub async fn flavors_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let result = sqlx::query("DELETE FROM flavors WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("Flavor", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
