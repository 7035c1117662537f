use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Create the PostgreSQL connection pool and run migrations.
/// Every route needs the datastore, so failure here aborts startup.
pub async fn init_pg_pool(config: &orderdesk_core::config::PostgresConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_string())
        .await
        .with_context(|| format!("failed to connect to PostgreSQL at {}", config.host))?;
    info!("PostgreSQL connected: {}", config.host);

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;
    info!("Database migrations applied successfully");

    Ok(pool)
}
