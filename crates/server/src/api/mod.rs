//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns one resource. Shared helpers and the error
//! response shape live here in mod.rs.

mod cashier_closings;
mod categories;
mod crushed_types;
pub mod doc;
mod flavors;
mod health;
mod orders;
mod packages;
mod profiles;
mod qr_codes;
mod reports;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// ── Helpers ──────────────────────────────────────────────────────

pub(crate) fn bad_request(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: msg.into() }))
}

pub(crate) fn not_found(resource: &str, id: Uuid) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("{} not found: {}", resource, id),
        }),
    )
}

/// Map a datastore or unexpected error to 500. The detail is always
/// logged; it only reaches the response body in debug builds.
pub(crate) fn internal_error(e: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!("internal error: {}", e);
    let error = if cfg!(debug_assertions) {
        e.to_string()
    } else {
        "internal server error".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error }))
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by router.rs.

pub use cashier_closings::{
    cashier_closings_create, cashier_closings_delete, cashier_closings_get,
    cashier_closings_list,
};
pub use categories::{
    categories_create, categories_delete, categories_get, categories_list, categories_update,
};
pub use crushed_types::{
    crushed_types_create, crushed_types_delete, crushed_types_get, crushed_types_list,
    crushed_types_update,
};
pub use flavors::{flavors_create, flavors_delete, flavors_get, flavors_list, flavors_update};
pub use health::health;
pub use orders::{
    orders_assign, orders_create, orders_delete, orders_get, orders_list, orders_update_status,
};
pub use packages::{
    packages_create, packages_delete, packages_get, packages_list, packages_update,
};
pub use profiles::{
    profiles_create, profiles_delete, profiles_get, profiles_list, profiles_update,
};
pub use qr_codes::{qr_create, qr_delete, qr_get, qr_list, qr_update};
pub use reports::{report_closings, report_daily, report_flavors, report_summary};
