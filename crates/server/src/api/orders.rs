//! Order endpoints: list/get/create, status and assignment patches, delete.
//!
//! Every successful mutation hands the fresh row to the broadcaster after
//! the datastore call returns. Delivery is fire-and-forget and can never
//! fail the request.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use orderdesk_core::event::StatusChange;
use orderdesk_core::model::{Order, OrderStatus};

use crate::state::AppState;

use super::{bad_request, internal_error, not_found, ApiResult, ErrorResponse};

const ORDER_COLUMNS: &str = "id, customer_name, flavors, sweetness, crushed_type, package_type, \
     amount, notes, payment_proof, status, assigned_to, created_at, updated_at";

// ── Request types ────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub flavors: Vec<String>,
    #[serde(default = "default_sweetness")]
    pub sweetness: String,
    #[serde(default)]
    pub crushed_type: String,
    #[serde(default)]
    pub package_type: String,
    #[serde(default)]
    pub amount: f64,
    pub notes: Option<String>,
    pub payment_proof: Option<String>,
}

fn default_sweetness() -> String {
    "normal".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRequest {
    /// Profile to hand the order to; `null` clears the assignment.
    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    pub status: Option<OrderStatus>,
}

// ── Handlers ─────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(ListOrdersQuery),
    responses((status = 200, description = "Orders, newest first", body = [Order]))
)]
pub async fn orders_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let rows = match query.status {
        Some(status) => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {} FROM orders WHERE status = $1 ORDER BY created_at DESC",
                ORDER_COLUMNS
            ))
            .bind(status)
            .fetch_all(&state.pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {} FROM orders ORDER BY created_at DESC",
                ORDER_COLUMNS
            ))
            .fetch_all(&state.pool)
            .await
        }
    }
    .map_err(internal_error)?;

    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 404, description = "No such order", body = ErrorResponse)
    )
)]
pub async fn orders_get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    let row = sqlx::query_as::<_, Order>(&format!(
        "SELECT {} FROM orders WHERE id = $1",
        ORDER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Order", id))?;

    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Missing required field", body = ErrorResponse)
    )
)]
pub async fn orders_create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    if req.customer_name.trim().is_empty() {
        return Err(bad_request("customer_name is required"));
    }
    if req.flavors.is_empty() {
        return Err(bad_request("at least one flavor is required"));
    }

    let row = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders
            (customer_name, flavors, sweetness, crushed_type, package_type, amount, notes, payment_proof)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {}",
        ORDER_COLUMNS
    ))
    .bind(&req.customer_name)
    .bind(&req.flavors)
    .bind(&req.sweetness)
    .bind(&req.crushed_type)
    .bind(&req.package_type)
    .bind(req.amount)
    .bind(&req.notes)
    .bind(&req.payment_proof)
    .fetch_one(&state.pool)
    .await
    .map_err(internal_error)?;

    state.broadcaster.order_created(&row).await;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Transition an order's status. Last write wins; concurrent updates are
/// not detected (single-row consistency only).
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "No such order", body = ErrorResponse)
    )
)]
pub async fn orders_update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Order>> {
    let old_status: OrderStatus = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Order", id))?;

    let row = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 RETURNING {}",
        ORDER_COLUMNS
    ))
    .bind(id)
    .bind(req.status)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Order", id))?;

    state.broadcaster.order_updated(&row).await;
    state
        .broadcaster
        .status_changed(StatusChange {
            id: row.id,
            old_status,
            new_status: row.status,
            customer_name: row.customer_name.clone(),
        })
        .await;

    Ok(Json(row))
}

#[utoipa::path(
    patch,
    path = "/orders/{id}/assign",
    tag = "Orders",
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 404, description = "No such order", body = ErrorResponse)
    )
)]
pub async fn orders_assign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignRequest>,
) -> ApiResult<Json<Order>> {
    let row = sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET assigned_to = $2, updated_at = now() WHERE id = $1 RETURNING {}",
        ORDER_COLUMNS
    ))
    .bind(id)
    .bind(req.assigned_to)
    .fetch_optional(&state.pool)
    .await
    .map_err(internal_error)?
    .ok_or_else(|| not_found("Order", id))?;

    state.broadcaster.order_updated(&row).await;

    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "No such order", body = ErrorResponse)
    )
)]
pub async fn orders_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("Order", id));
    }

    state.broadcaster.order_deleted(id).await;

    Ok(StatusCode::NO_CONTENT)
}
