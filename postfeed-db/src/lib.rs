//! postfeed-db: PostgreSQL storage for postfeed
//!
//! Renders the core query plan into SQL and evaluates it inside a
//! read-only transaction.

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod sql;
pub mod store;

pub use config::DbConfig;
pub use error::DbError;
pub use pool::{create_pool, create_pool_from_config, create_pool_with_options};
pub use store::PgPostStore;
