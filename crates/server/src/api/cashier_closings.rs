//! Cashier closing endpoints: end-of-shift till records.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use orderdesk_core::model::CashierClosing;

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

const CLOSING_COLUMNS: &str =
    "id, closed_by, closing_date, cash_total, transfer_total, order_count, notes, created_at";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClosingRequest {
    pub closed_by: Option<Uuid>,
    pub closing_date: NaiveDate,
    #[serde(default)]
    pub cash_total: f64,
    #[serde(default)]
    pub transfer_total: f64,
    #[serde(default)]
    pub order_count: i32,
    pub notes: Option<String>,
}

#[utoipa::path(
    get,
    path = "/cashier-closings",
    tag = "Cashier",
    responses((status = 200, description = "All closings, newest first", body = [CashierClosing]))
)]
pub async fn cashier_closings_list(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CashierClosing>>> {
    let rows = sqlx::query_as::<_, CashierClosing>(&format!(
        "SELECT {} FROM cashier_closings ORDER BY closing_date DESC, created_at DESC",
        CLOSING_COLUMNS
    ))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/cashier-closings",
    tag = "Cashier",
    request_body = CreateClosingRequest,
    responses(
        (status = 201, description = "Closing recorded", body = CashierClosing),
        (status = 400, description = "Invalid totals", body = ErrorResponse)
    )
)]
pub async fn cashier_closings_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateClosingRequest>,
) -> ApiResult<(StatusCode, Json<CashierClosing>)> {
    if req.cash_total < 0.0 || req.transfer_total < 0.0 || req.order_count < 0 {
        return Err(bad_request("totals must not be negative"));
    }

    let row = sqlx::query_as::<_, CashierClosing>(&format!(
        "INSERT INTO cashier_closings
            (closed_by, closing_date, cash_total, transfer_total, order_count, notes)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {}",
        CLOSING_COLUMNS
    ))
    .bind(req.closed_by)
    .bind(req.closing_date)
    .bind(req.cash_total)
    .bind(req.transfer_total)
    .bind(req.order_count)
    .bind(&req.notes)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    get,
    path = "/cashier-closings/{id}",
    tag = "Cashier",
    responses(
        (status = 200, description = "Closing", body = CashierClosing),
        (status = 404, description = "No such closing", body = ErrorResponse)
    )
)]
pub async fn cashier_closings_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CashierClosing>> {
    let row = sqlx::query_as::<_, CashierClosing>(&format!(
        "SELECT {} FROM cashier_closings WHERE id = $1",
        CLOSING_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("CashierClosing", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/cashier-closings/{id}",
    tag = "Cashier",
    responses(
        (status = 204, description = "Closing deleted"),
        (status = 404, description = "No such closing", body = ErrorResponse)
    )
)]
pub async fn cashier_closings_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let result = sqlx::query("DELETE FROM cashier_closings WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("CashierClosing", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
