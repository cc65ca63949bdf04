use sqlx::PgPool;
use tracing::error;

/// Database health status
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PoolHealth {
    pub is_healthy: bool,
    pub latency_ms: u64,
    pub pool_size: u32,
    pub idle_connections: usize,
}

/// Verifies database connectivity and returns health metrics
pub async fn check_database_health(pool: &PgPool) -> Result<PoolHealth, sqlx::Error> {
    let start = std::time::Instant::now();

    // Simple ping query
    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        error!("Database health check failed: {}", e);
        e
    })?;

    let latency = start.elapsed();

    Ok(PoolHealth {
        is_healthy: true,
        latency_ms: latency.as_millis() as u64,
        pool_size: pool.size(),
        idle_connections: pool.num_idle(),
    })
}

/// Check if a specific table exists in the public schema
pub async fn check_table_exists(pool: &PgPool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = $1
        )",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}
