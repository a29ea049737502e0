//! SQLite storage for the event table.
//!
//! The schema lives in `migrations/` and carries every column constraint
//! (non-empty text, `YYYY-MM-DD HH:MM` dates, enumerated status), so a row
//! that reaches the table is always valid regardless of which caller wrote it.

use std::path::{Path, PathBuf};

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use thiserror::Error;

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create database directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to prepare schema: {0}")]
    Migrate(#[from] MigrateError),
}

/// Handle to the on-disk event store.
///
/// Holds only the connection options; every caller opens its own connection
/// through [`Store::connect`] and drops it when done.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the database directory, file and table when missing.
    ///
    /// Safe to call on every start; applied migrations are skipped.
    pub async fn ensure_ready(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut conn = self.connect().await?;
        MIGRATOR.run(&mut conn).await?;

        tracing::info!(path = %self.path.display(), "Event store ready");
        Ok(())
    }

    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_count(store: &Store) -> i64 {
        let mut conn = store.connect().await.unwrap();
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'events'",
        )
        .fetch_one(&mut conn)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_ensure_ready_creates_directory_and_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("agenda.db");
        let store = Store::new(&path);

        store.ensure_ready().await.unwrap();

        assert!(path.exists());
        assert_eq!(table_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_ensure_ready_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("agenda.db"));

        store.ensure_ready().await.unwrap();
        store.ensure_ready().await.unwrap();

        assert_eq!(table_count(&store).await, 1);
    }

    #[tokio::test]
    async fn test_table_rejects_malformed_dates() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("agenda.db"));
        store.ensure_ready().await.unwrap();

        let mut conn = store.connect().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO events (title, description, start_at, end_at, location, status)
             VALUES ('a', 'b', '2025/04/01 14:00', '2025-04-01 18:00', 'c', 'RECEIVED')",
        )
        .execute(&mut conn)
        .await;

        let err = result.unwrap_err();
        let db_err = err.as_database_error().expect("constraint error");
        assert!(db_err.message().contains("events_start_format"));
    }
}
