//! Process-wide storage handle.
//!
//! One [`Database`] is opened at startup and handed to every service that
//! needs it. Cloning is cheap (the pool is reference counted); [`Database::close`]
//! releases the underlying connections on shutdown.

use std::future::Future;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::{info, log::LevelFilter};

use crate::config::ChatConfig;
use crate::error::{ChatError, Result};

#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
    storage_timeout: Duration,
}

impl Database {
    /// Open (creating if missing) the database file and ensure both tables exist.
    pub async fn open(config: &ChatConfig) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ChatError::StorageUnavailable(e.to_string()))?;
            }
        }

        let connection_options = SqliteConnectOptions::new()
            .filename(&config.db_path)
            .create_if_missing(true)
            .log_slow_statements(LevelFilter::Off, Duration::from_secs(1))
            .log_statements(LevelFilter::Debug);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(config.storage_timeout)
            .connect_with(connection_options)
            .await?;

        let db = Self {
            pool,
            storage_timeout: config.storage_timeout,
        };
        db.create_tables().await?;

        info!("[Db] Connected to SQLite database at {:?}", config.db_path);
        Ok(db)
    }

    async fn create_tables(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS rooms (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_name TEXT NOT NULL UNIQUE
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Run a storage call under the configured timeout.
    ///
    /// The outer `Result` carries the timeout; the inner one is the raw
    /// driver result so callers can inspect constraint violations.
    pub(crate) async fn bounded<T, F>(&self, call: F) -> Result<std::result::Result<T, sqlx::Error>>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.storage_timeout, call)
            .await
            .map_err(|_| {
                ChatError::StorageUnavailable(format!(
                    "storage call exceeded {:?}",
                    self.storage_timeout
                ))
            })
    }

    /// Close every pooled connection. Later calls fail with `StorageUnavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("[Db] Database connection closed");
    }
}
