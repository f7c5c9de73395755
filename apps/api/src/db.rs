use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Opens the connection pool backing the job board (users, jobs,
/// applications, sessions). Pool size comes from `DATABASE_POOL_SIZE`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to the job-board database...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("Job-board database pool ready ({max_connections} connections)");
    Ok(pool)
}
