//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "orderdesk API",
        version = "0.1.0",
        description = "Retail order management: catalog CRUD, order lifecycle with live broadcast, and sales reports.",
    ),
    tags(
        (name = "Health", description = "Server readiness and datastore reachability"),
        (name = "Catalog", description = "Categories, flavors, packages, crushed types, and payment QR codes"),
        (name = "Orders", description = "Order lifecycle: create, status transitions, assignment, delete"),
        (name = "Profiles", description = "Dashboard users (admins and employees)"),
        (name = "Cashier", description = "End-of-shift cashier closings"),
        (name = "Reports", description = "Day-bucketed sales, flavor popularity, and summary partitions"),
    ),
    paths(
        // Health
        crate::api::health::health,
        // Categories
        crate::api::categories::categories_list,
        crate::api::categories::categories_create,
        crate::api::categories::categories_get,
        crate::api::categories::categories_update,
        crate::api::categories::categories_delete,
        // Flavors
        crate::api::flavors::flavors_list,
        crate::api::flavors::flavors_create,
        crate::api::flavors::flavors_get,
        crate::api::flavors::flavors_update,
        crate::api::flavors::flavors_delete,
        // Packages
        crate::api::packages::packages_list,
        crate::api::packages::packages_create,
        crate::api::packages::packages_get,
        crate::api::packages::packages_update,
        crate::api::packages::packages_delete,
        // Crushed types
        crate::api::crushed_types::crushed_types_list,
        crate::api::crushed_types::crushed_types_create,
        crate::api::crushed_types::crushed_types_get,
        crate::api::crushed_types::crushed_types_update,
        crate::api::crushed_types::crushed_types_delete,
        // QR codes
        crate::api::qr_codes::qr_list,
        crate::api::qr_codes::qr_create,
        crate::api::qr_codes::qr_get,
        crate::api::qr_codes::qr_update,
        crate::api::qr_codes::qr_delete,
        // Profiles
        crate::api::profiles::profiles_list,
        crate::api::profiles::profiles_create,
        crate::api::profiles::profiles_get,
        crate::api::profiles::profiles_update,
        crate::api::profiles::profiles_delete,
        // Orders
        crate::api::orders::orders_list,
        crate::api::orders::orders_get,
        crate::api::orders::orders_create,
        crate::api::orders::orders_update_status,
        crate::api::orders::orders_assign,
        crate::api::orders::orders_delete,
        // Cashier closings
        crate::api::cashier_closings::cashier_closings_list,
        crate::api::cashier_closings::cashier_closings_create,
        crate::api::cashier_closings::cashier_closings_get,
        crate::api::cashier_closings::cashier_closings_delete,
        // Reports
        crate::api::reports::report_daily,
        crate::api::reports::report_flavors,
        crate::api::reports::report_summary,
        crate::api::reports::report_closings,
    ),
    components(schemas(
        orderdesk_core::model::Order,
        orderdesk_core::model::OrderStatus,
        orderdesk_core::model::Role,
        orderdesk_core::model::Category,
        orderdesk_core::model::Flavor,
        orderdesk_core::model::Package,
        orderdesk_core::model::CrushedType,
        orderdesk_core::model::QrCode,
        orderdesk_core::model::Profile,
        orderdesk_core::model::CashierClosing,
        crate::api::ErrorResponse,
        crate::reports::DayBucket,
        crate::reports::FlavorCount,
        crate::reports::StatusBreakdown,
        crate::reports::SalesSummary,
    ))
)]
pub struct ApiDoc;
