//! Error types for postfeed-db

use postfeed_core::StoreError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("configuration error: {reason}")]
    Config { reason: String },

    #[error("invalid value in column '{column}': {reason}")]
    InvalidRow { column: &'static str, reason: String },
}

impl DbError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Sqlx(sqlx::Error::PoolClosed) => {
                StoreError::Unavailable("connection pool closed".into())
            }
            other => StoreError::backend(other),
        }
    }
}
