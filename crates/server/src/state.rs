use sqlx::PgPool;

use crate::live::{OrderBroadcaster, Rooms};

/// Process-wide shared state; one instance behind an `Arc` for the
/// lifetime of the server. The pool is the single datastore client
/// reused across all requests.
pub struct AppState {
    pub pool: PgPool,
    pub rooms: Rooms,
    pub broadcaster: OrderBroadcaster,
    pub config: orderdesk_core::Config,
}
