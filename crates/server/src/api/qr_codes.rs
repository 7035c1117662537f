//! Payment QR code CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use orderdesk_core::model::QrCode;

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

const QR_COLUMNS: &str = "id, label, image_url, active, created_at";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQrRequest {
    pub label: String,
    pub image_url: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQrRequest {
    pub label: Option<String>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

fn default_active() -> bool {
    true
}

#[utoipa::path(
    get,
    path = "/qr",
    tag = "Catalog",
    responses((status = 200, description = "All QR codes", body = [QrCode]))
)]
pub async fn qr_list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<QrCode>>> {
    let rows = sqlx::query_as::<_, QrCode>(&format!(
        "SELECT {} FROM qr_codes ORDER BY created_at DESC",
        QR_COLUMNS
    ))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/qr",
    tag = "Catalog",
    request_body = CreateQrRequest,
    responses(
        (status = 201, description = "QR code created", body = QrCode),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn qr_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateQrRequest>,
) -> ApiResult<(StatusCode, Json<QrCode>)> {
    if req.label.trim().is_empty() || req.image_url.trim().is_empty() {
        return Err(bad_request("label and image_url are required"));
    }

    let row = sqlx::query_as::<_, QrCode>(&format!(
        "INSERT INTO qr_codes (label, image_url, active) VALUES ($1, $2, $3)
         RETURNING {}",
        QR_COLUMNS
    ))
    .bind(&req.label)
    .bind(&req.image_url)
    .bind(req.active)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/qr/{id}",
    tag = "Catalog",
    responses(
        (status = 200, description = "QR code", body = QrCode),
        (status = 404, description = "No such QR code", body = ErrorResponse)
    )
)]
pub async fn qr_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<QrCode>> {
    let row = sqlx::query_as::<_, QrCode>(&format!(
        "SELECT {} FROM qr_codes WHERE id = $1",
        QR_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("QrCode", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    put,
    path = "/qr/{id}",
    tag = "Catalog",
    request_body = UpdateQrRequest,
    responses(
        (status = 200, description = "Updated QR code", body = QrCode),
        (status = 404, description = "No such QR code", body = ErrorResponse)
    )
)]
pub async fn qr_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateQrRequest>,
) -> ApiResult<Json<QrCode>> {
    let row = sqlx::query_as::<_, QrCode>(&format!(
        "UPDATE qr_codes SET
            label = COALESCE($2, label),
            image_url = COALESCE($3, image_url),
            active = COALESCE($4, active)
         WHERE id = $1
         RETURNING {}",
        QR_COLUMNS
    ))
    .bind(id)
    .bind(&req.label)
    .bind(&req.image_url)
    .bind(req.active)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("QrCode", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/qr/{id}",
    tag = "Catalog",
    responses(
        (status = 204, description = "QR code deleted"),
        (status = 404, description = "No such QR code", body = ErrorResponse)
    )
)]
pub async fn qr_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let result = sqlx::query("DELETE FROM qr_codes WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("QrCode", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
