// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use folio_core::FolioError;
use tokio_rusqlite::Connection;
use tracing::debug;

const PRAGMAS: &str = "PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA busy_timeout = 5000;
PRAGMA foreign_keys = ON;";

/// Handle to the single SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs and run migrations.
    pub async fn open(path: &str) -> Result<Self, FolioError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(FolioError::storage)?;
        }
        let conn = Connection::open(path).await.map_err(FolioError::storage)?;
        let db = Self { conn };
        db.prepare().await?;
        debug!(path, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database. Contents vanish on close.
    pub async fn open_in_memory() -> Result<Self, FolioError> {
        let conn = Connection::open_in_memory().await.map_err(FolioError::storage)?;
        let db = Self { conn };
        db.prepare().await?;
        Ok(db)
    }

    async fn prepare(&self) -> Result<(), FolioError> {
        self.conn
            .call(|conn| -> Result<(), FolioError> {
                conn.execute_batch(PRAGMAS).map_err(FolioError::storage)?;
                crate::migrations::run_migrations(conn)
            })
            .await
            .map_err(|e| match e {
                tokio_rusqlite::Error::Error(inner) => inner,
                other => FolioError::Storage {
                    source: other.to_string().into(),
                },
            })
    }

    /// The underlying connection. Query modules go through `call()` on it.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), FolioError> {
        self.conn
            .call(|conn| conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);"))
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Map a tokio-rusqlite error onto [`FolioError::Storage`].
pub fn map_tr_err(err: tokio_rusqlite::Error<rusqlite::Error>) -> FolioError {
    match err {
        tokio_rusqlite::Error::Error(e) => FolioError::storage(e),
        other => FolioError::Storage {
            source: other.to_string().into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/folio.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_documents_table() {
        let db = Database::open_in_memory().await.unwrap();
        let count: i64 = db
            .connection()
            .call(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'documents'",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let path = path.to_str().unwrap();
        Database::open(path).await.unwrap().close().await.unwrap();
        Database::open(path).await.unwrap().close().await.unwrap();
    }
}
