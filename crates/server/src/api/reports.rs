//! Report endpoints: thin handlers that run the datastore range query and
//! hand the rows to the in-memory aggregator.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use orderdesk_core::model::{CashierClosing, Order, OrderStatus};

use crate::reports::{daily_sales, flavor_frequency, summary, DayBucket, FlavorCount, SalesSummary};
use crate::state::AppState;

use super::{bad_request, internal_error, ApiResult, ErrorResponse};

const ORDER_COLUMNS: &str = "id, customer_name, flavors, sweetness, crushed_type, package_type, \
     amount, notes, payment_proof, status, assigned_to, created_at, updated_at";

const MAX_WINDOW_DAYS: u32 = 365;

#[derive(Debug, Deserialize, IntoParams)]
pub struct WindowQuery {
    /// Trailing window size in days.
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClosingsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

fn window_start(today: NaiveDate, days: u32) -> DateTime<Utc> {
    (today - Duration::days(i64::from(days) - 1))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn check_days(days: u32) -> Result<(), (axum::http::StatusCode, Json<ErrorResponse>)> {
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(bad_request(format!(
            "days must be between 1 and {}",
            MAX_WINDOW_DAYS
        )));
    }
    Ok(())
}

/// Completed sales bucketed per calendar day over the trailing window.
#[utoipa::path(
    get,
    path = "/reports/daily",
    tag = "Reports",
    params(WindowQuery),
    responses(
        (status = 200, description = "One bucket per day, oldest first", body = [DayBucket]),
        (status = 400, description = "Invalid window", body = ErrorResponse)
    )
)]
pub async fn report_daily(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<Vec<DayBucket>>> {
    let days = query.days.unwrap_or(7);
    check_days(days)?;

    let today = Utc::now().date_naive();
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {} FROM orders WHERE status = $1 AND created_at >= $2",
        ORDER_COLUMNS
    ))
    .bind(OrderStatus::Completed)
    .bind(window_start(today, days))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(daily_sales(&orders, days, today)))
}

/// Flavor popularity over the trailing window, all statuses.
#[utoipa::path(
    get,
    path = "/reports/flavors",
    tag = "Reports",
    params(WindowQuery),
    responses(
        (status = 200, description = "Flavor tallies, most frequent first", body = [FlavorCount]),
        (status = 400, description = "Invalid window", body = ErrorResponse)
    )
)]
pub async fn report_flavors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<Vec<FlavorCount>>> {
    let days = query.days.unwrap_or(30);
    check_days(days)?;

    let today = Utc::now().date_naive();
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {} FROM orders WHERE created_at >= $1",
        ORDER_COLUMNS
    ))
    .bind(window_start(today, days))
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(flavor_frequency(&orders)))
}

/// Today/month status partitions. The month fetch covers today as well,
/// so one query feeds both windows.
#[utoipa::path(
    get,
    path = "/reports/summary",
    tag = "Reports",
    responses((status = 200, description = "Today and current-month partitions", body = SalesSummary))
)]
pub async fn report_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SalesSummary>> {
    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {} FROM orders WHERE created_at >= $1",
        ORDER_COLUMNS
    ))
    .bind(month_start.and_time(NaiveTime::MIN).and_utc())
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(summary(&orders, today)))
}

/// Cashier closings within an optional date range.
#[utoipa::path(
    get,
    path = "/reports/closings",
    tag = "Reports",
    params(ClosingsQuery),
    responses((status = 200, description = "Closings in range, newest first", body = [CashierClosing]))
)]
pub async fn report_closings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClosingsQuery>,
) -> ApiResult<Json<Vec<CashierClosing>>> {
    let rows = sqlx::query_as::<_, CashierClosing>(
        "SELECT id, closed_by, closing_date, cash_total, transfer_total, order_count, notes, created_at
         FROM cashier_closings
         WHERE ($1::date IS NULL OR closing_date >= $1)
           AND ($2::date IS NULL OR closing_date <= $2)
         ORDER BY closing_date DESC, created_at DESC",
    )
    .bind(query.from)
    .bind(query.to)
    .fetch_all(&state.pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(rows))
}
