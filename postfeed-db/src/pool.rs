//! Connection pools for `PgPostStore`
//!
//! Every page request holds one connection for its read-only transaction
//! (count, then page), so the pool size caps concurrent `get_posts` calls.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{DbConfig, DEFAULT_MAX_CONNECTIONS};

/// Open a pool for the posts database at `database_url`, sized to
/// `DEFAULT_MAX_CONNECTIONS`.
///
/// Fails when the first connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Open the pool described by `DbConfig`, honouring
/// `POSTFEED_DB_MAX_CONNECTIONS` when it was set.
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let store = PgPostStore::new(create_pool_from_config(&config).await?);
/// ```
pub async fn create_pool_from_config(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(&config.database_url, config.max_connections).await
}

pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
