//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use tracing::info;

use crate::error::StorageError;

/// Manages a single SQLite pool; creates the DB file if missing.
///
/// Cloning is cheap and shares the underlying pool, so several repositories can use one manager.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL.
    ///
    /// Any failure to open the database is reported as [`StorageError::Connection`].
    ///
    /// `sqlite:` URLs (including `sqlite::memory:`) are parsed as URLs, anything else is a file path.
    /// Foreign keys are enforced on every connection.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        info!("Initializing SQLite pool: {}", database_url);

        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)?
        } else {
            SqliteConnectOptions::new().filename(database_url)
        };
        let options = options.create_if_missing(true).foreign_keys(true);

        // Each in-memory connection is its own database; keep exactly one alive.
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks out one connection; it goes back to the pool when dropped.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StorageError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}
