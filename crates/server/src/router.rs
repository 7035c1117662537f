//! HTTP router construction.
//!
//! Assembles all Axum routes, CORS, the live WebSocket endpoint, and the
//! OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, patch};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::state::AppState;
use crate::{api, live};

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        .route(
            "/categories",
            get(api::categories_list).post(api::categories_create),
        )
        .route(
            "/categories/{id}",
            get(api::categories_get)
                .put(api::categories_update)
                .delete(api::categories_delete),
        )
        .route("/flavors", get(api::flavors_list).post(api::flavors_create))
        .route(
            "/flavors/{id}",
            get(api::flavors_get)
                .put(api::flavors_update)
                .delete(api::flavors_delete),
        )
        .route(
            "/packages",
            get(api::packages_list).post(api::packages_create),
        )
        .route(
            "/packages/{id}",
            get(api::packages_get)
                .put(api::packages_update)
                .delete(api::packages_delete),
        )
        .route(
            "/crushed-types",
            get(api::crushed_types_list).post(api::crushed_types_create),
        )
        .route(
            "/crushed-types/{id}",
            get(api::crushed_types_get)
                .put(api::crushed_types_update)
                .delete(api::crushed_types_delete),
        )
        .route("/qr", get(api::qr_list).post(api::qr_create))
        .route(
            "/qr/{id}",
            get(api::qr_get).put(api::qr_update).delete(api::qr_delete),
        )
        .route(
            "/profiles",
            get(api::profiles_list).post(api::profiles_create),
        )
        .route(
            "/profiles/{id}",
            get(api::profiles_get)
                .put(api::profiles_update)
                .delete(api::profiles_delete),
        )
        .route("/orders", get(api::orders_list).post(api::orders_create))
        .route(
            "/orders/{id}",
            get(api::orders_get).delete(api::orders_delete),
        )
        .route("/orders/{id}/status", patch(api::orders_update_status))
        .route("/orders/{id}/assign", patch(api::orders_assign))
        .route(
            "/cashier-closings",
            get(api::cashier_closings_list).post(api::cashier_closings_create),
        )
        .route(
            "/cashier-closings/{id}",
            get(api::cashier_closings_get).delete(api::cashier_closings_delete),
        )
        .route("/reports/daily", get(api::report_daily))
        .route("/reports/flavors", get(api::report_flavors))
        .route("/reports/summary", get(api::report_summary))
        .route("/reports/closings", get(api::report_closings))
        .route("/ws", get(live::ws_upgrade))
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

/// CORS from config: a single allowed origin, or permissive for "*".
fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!("invalid CORS_ORIGIN '{}' — falling back to permissive", origin);
            CorsLayer::permissive()
        }
    }
}
