/// Database access layer
///
/// This module provides:
/// - Connection pool creation from typed connect options
/// - Repositories for posts, comments and likes (`board` schema)
/// - Read-only aggregate queries against the FMS shipment view (`fms` schema)
///
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;
pub mod shipment_repo;

use crate::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Create a PostgreSQL connection pool and verify it with a test query
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    debug!(
        "Creating database pool: host={}, db={}, max={}, min={}, \
         acquire_timeout={}s, idle_timeout={}s",
        config.host,
        config.name,
        config.max_connections,
        config.min_connections,
        config.acquire_timeout_secs,
        config.idle_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        // Timeout for acquiring a connection from the pool
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        // Close connections idle for longer than this
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        // Maximum lifetime of a connection (to handle stale connections)
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        // Test connections before returning them from the pool
        .test_before_acquire(true)
        .connect_with(config.connect_options())
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("Database pool created and verified successfully");

    Ok(pool)
}
