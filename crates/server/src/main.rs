mod api;
mod db;
mod live;
mod reports;
mod router;
mod state;

use std::sync::Arc;

use tracing::info;

use crate::live::{OrderBroadcaster, Rooms};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    orderdesk_core::config::load_dotenv();
    let config = orderdesk_core::Config::from_env();
    config.log_summary();

    let pool = db::init_pg_pool(&config.postgres).await?;

    let rooms = Rooms::new();
    let state = Arc::new(AppState {
        pool,
        broadcaster: OrderBroadcaster::new(rooms.clone()),
        rooms,
        config: config.clone(),
    });

    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("orderdesk listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
