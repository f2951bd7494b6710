//! Database configuration from the environment
//!
//! Environment variables:
//!   DATABASE_URL                  # PostgreSQL connection string (required)
//!   POSTFEED_DB_MAX_CONNECTIONS   # Pool size (default: 5)
//!
//! A `.env` file in the working directory is loaded first when present.

use crate::error::DbError;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/postfeed";

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load from `.env` and the process environment.
    ///
    /// Fails when `DATABASE_URL` is missing or the pool size is not a positive integer.
    pub fn from_env() -> Result<Self, DbError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to load .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DbError::config("DATABASE_URL is not set"))?;

        let max_connections = match lookup("POSTFEED_DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    DbError::config(format!(
                        "POSTFEED_DB_MAX_CONNECTIONS must be a positive integer, got '{}'",
                        raw
                    ))
                })?,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
