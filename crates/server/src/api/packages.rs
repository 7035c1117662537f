//! Package CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use orderdesk_core::model::Package;

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

const PACKAGE_COLUMNS: &str = "id, name, description, price, active, created_at";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePackageRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub active: Option<bool>,
}

fn default_active() -> bool {
    true
}

#[utoipa::path(
    get,
    path = "/packages",
    tag = "Catalog",
    responses((status = 200, description = "All packages", body = [Package]))
)]
pub async fn packages_list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Package>>> {
    let rows = sqlx::query_as::<_, Package>(&format!(
        "SELECT {} FROM packages ORDER BY name",
        PACKAGE_COLUMNS
    ))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/packages",
    tag = "Catalog",
    request_body = CreatePackageRequest,
    responses(
        (status = 201, description = "Package created", body = Package),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn packages_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePackageRequest>,
) -> ApiResult<(StatusCode, Json<Package>)> {
    if req.name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }

    let row = sqlx::query_as::<_, Package>(&format!(
        "INSERT INTO packages (name, description, price, active) VALUES ($1, $2, $3, $4)
         RETURNING {}",
        PACKAGE_COLUMNS
    ))
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.active)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/packages/{id}",
    tag = "Catalog",
    responses(
        (status = 200, description = "Package", body = Package),
        (status = 404, description = "No such package", body = ErrorResponse)
    )
)]
pub async fn packages_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Package>> {
    let row = sqlx::query_as::<_, Package>(&format!(
        "SELECT {} FROM packages WHERE id = $1",
        PACKAGE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Package", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    put,
    path = "/packages/{id}",
    tag = "Catalog",
    request_body = UpdatePackageRequest,
    responses(
        (status = 200, description = "Updated package", body = Package),
        (status = 404, description = "No such package", body = ErrorResponse)
    )
)]
pub async fn packages_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePackageRequest>,
) -> ApiResult<Json<Package>> {
    let row = sqlx::query_as::<_, Package>(&format!(
        "UPDATE packages SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            price = COALESCE($4, price),
            active = COALESCE($5, active)
         WHERE id = $1
         RETURNING {}",
        PACKAGE_COLUMNS
    ))
    .bind(id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.price)
    .bind(req.active)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Package", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/packages/{id}",
    tag = "Catalog",
    responses(
        (status = 204, description = "Package deleted"),
        (status = 404, description = "No such package", body = ErrorResponse)
    )
)]
pub async fn packages_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let result = sqlx::query("DELETE FROM packages WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("Package", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
