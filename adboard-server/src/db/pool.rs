//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created once
//! at startup and closed once at shutdown; requests only borrow from it.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use adboard_core::config::{DatabaseSection, DEFAULT_MAX_CONNECTIONS};

/// Connection parameters for the record store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl From<&DatabaseSection> for StoreConfig {
    fn from(section: &DatabaseSection) -> Self {
        Self {
            database_url: section.url.clone(),
            max_connections: section.max_connections,
        }
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/ads").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create a pool from a `StoreConfig`.
pub async fn connect(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections = config.max_connections, "connecting to database");
    create_pool_with_options(&config.database_url, config.max_connections).await
}
