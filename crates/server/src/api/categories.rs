//! Category CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use orderdesk_core::model::Category;

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    responses((status = 200, description = "All categories", body = [Category]))
)]
pub async fn categories_list(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Category>>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at FROM categories ORDER BY name",
    )
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "Catalog",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn categories_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    if req.name.trim().is_empty() {
        return Err(bad_request("name is required"));
    }

    let row = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, description) VALUES ($1, $2)
         RETURNING id, name, description, created_at",
    )
    .bind(&req.name)
    .bind(&req.description)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Catalog",
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "No such category", body = ErrorResponse)
    )
)]
pub async fn categories_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Category>> {
    let row = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, created_at FROM categories WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Category", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Catalog",
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 404, description = "No such category", body = ErrorResponse)
    )
)]
pub async fn categories_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<Category>> {
    let row = sqlx::query_as::<_, Category>(
        "UPDATE categories SET
            name = COALESCE($2, name),
            description = COALESCE($3, description)
         WHERE id = $1
         RETURNING id, name, description, created_at",
    )
    .bind(id)
    .bind(&req.name)
    .bind(&req.description)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Category", id))?;

    Ok(Json(row))
}

/// Delete a category. Refused while any flavor still references it.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Catalog",
    responses(
        (status = 204, description = "Category deleted"),
        (status = 400, description = "Category still referenced", body = ErrorResponse),
        (status = 404, description = "No such category", body = ErrorResponse)
    )
)]
pub async fn categories_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let (referencing,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM flavors WHERE category_id = $1")
            .bind(id)
            .fetch_one(&state.pool)
            .await
            .map_err(internal_error)?;
    if referencing > 0 {
        return Err(bad_request(format!(
            "category is referenced by {} flavor(s)",
            referencing
        )));
    }

    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("Category", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
