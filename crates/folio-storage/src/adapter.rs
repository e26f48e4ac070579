// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DocumentStore trait.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::OnceCell;
use tracing::debug;

use folio_config::model::StorageConfig;
use folio_core::{
    AdapterType, Collection, Document, DocumentStore, FolioError, HealthStatus, PluginAdapter,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed document store.
///
/// The database is opened lazily by [`DocumentStore::initialize`]; every
/// other operation fails until then.
pub struct SqliteDocumentStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteDocumentStore {
    /// Create a new store for the configured path without opening it.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, FolioError> {
        self.db.get().ok_or_else(|| FolioError::Storage {
            source: "document store not initialized -- call initialize() first".into(),
        })
    }

    async fn checkpoint(db: &Database) -> Result<(), FolioError> {
        db.connection()
            .call(|conn| conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);"))
            .await
            .map_err(map_tr_err)
    }
}

#[async_trait]
impl PluginAdapter for SqliteDocumentStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::DocumentStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        db.connection()
            .call(|conn| conn.execute_batch("SELECT 1;"))
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        if let Some(db) = self.db.get() {
            Self::checkpoint(db).await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn initialize(&self) -> Result<(), FolioError> {
        let db = Database::open(&self.config.database_path).await?;
        self.db.set(db).map_err(|_| FolioError::Storage {
            source: "document store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite document store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), FolioError> {
        Self::checkpoint(self.db()?).await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Document, FolioError> {
        queries::documents::insert_document(self.db()?, collection, fields).await
    }

    async fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, FolioError> {
        queries::documents::get_document(self.db()?, collection, id).await
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, FolioError> {
        queries::documents::list_documents(self.db()?, collection).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), FolioError> {
        queries::documents::update_document(self.db()?, collection, id, fields).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), FolioError> {
        queries::documents::delete_document(self.db()?, collection, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn make_config(path: &std::path::Path) -> StorageConfig {
        StorageConfig {
            database_path: path.to_str().unwrap().to_string(),
        }
    }

    #[tokio::test]
    async fn reports_identity() {
        let dir = tempdir().unwrap();
        let store = SqliteDocumentStore::new(make_config(&dir.path().join("id.db")));
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.adapter_type(), AdapterType::DocumentStore);
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let store = SqliteDocumentStore::new(make_config(&dir.path().join("early.db")));
        assert!(store.list(Collection::Reels).await.is_err());
        assert!(!store.health_check().await.unwrap().is_healthy());
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let store = SqliteDocumentStore::new(make_config(&dir.path().join("twice.db")));
        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("persist.db");

        let store = SqliteDocumentStore::new(make_config(&path));
        store.initialize().await.unwrap();
        let doc = store
            .insert(
                Collection::Applications,
                json!({"name": "Ana", "status": "pending"})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();
        store.close().await.unwrap();
        drop(store);

        let reopened = SqliteDocumentStore::new(make_config(&path));
        reopened.initialize().await.unwrap();
        assert!(reopened.health_check().await.unwrap().is_healthy());
        let fetched = reopened
            .get(Collection::Applications, &doc.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.str_field("name"), Some("Ana"));
        reopened.shutdown().await.unwrap();
    }
}
