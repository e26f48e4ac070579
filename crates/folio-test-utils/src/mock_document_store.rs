// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store for deterministic testing.
//!
//! Honors the same contract as the SQLite store: server-assigned ids,
//! strictly increasing `created_at` per collection, newest-first listing,
//! merge-on-update and idempotent delete.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, SubsecRound, Utc};
use serde_json::{Map, Value};

use folio_core::{
    AdapterType, Collection, Document, DocumentStore, FolioError, HealthStatus, PluginAdapter,
};

#[derive(Default)]
struct Counters {
    inserts: AtomicUsize,
    gets: AtomicUsize,
    lists: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

/// A mock document store.
#[derive(Default)]
pub struct MockDocumentStore {
    // Insertion order per collection.
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
    counters: Counters,
    fail: AtomicBool,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a storage error (or stop failing).
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    fn check(&self, counter: &AtomicUsize) -> Result<(), FolioError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(FolioError::Storage {
                source: "mock document store failure".into(),
            });
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Collection, Vec<Document>>> {
        self.collections.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Put a document in place as-is, bypassing id and timestamp assignment.
    /// Used to seed legacy-shaped records.
    pub fn seed(&self, collection: Collection, document: Document) {
        self.lock().entry(collection).or_default().push(document);
    }

    pub fn insert_count(&self) -> usize {
        self.counters.inserts.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.counters.updates.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.counters.deletes.load(Ordering::SeqCst)
    }

    /// Calls of any kind, including failed ones.
    pub fn total_calls(&self) -> usize {
        let c = &self.counters;
        [&c.inserts, &c.gets, &c.lists, &c.updates, &c.deletes]
            .iter()
            .map(|n| n.load(Ordering::SeqCst))
            .sum()
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: Collection) -> usize {
        self.lock().get(&collection).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl PluginAdapter for MockDocumentStore {
    fn name(&self) -> &str {
        "mock-documents"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::DocumentStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        if self.fail.load(Ordering::SeqCst) {
            Ok(HealthStatus::Unhealthy("mock failure".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn initialize(&self) -> Result<(), FolioError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), FolioError> {
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        mut fields: Map<String, Value>,
    ) -> Result<Document, FolioError> {
        self.check(&self.counters.inserts)?;
        fields.remove("id");
        fields.remove("createdAt");

        let mut collections = self.lock();
        let docs = collections.entry(collection).or_default();
        let mut created_at = Utc::now().trunc_subsecs(6);
        if let Some(newest) = docs.iter().map(|d| d.created_at).max()
            && created_at <= newest
        {
            created_at = newest + Duration::microseconds(1);
        }
        let document = Document {
            id: uuid::Uuid::new_v4().simple().to_string(),
            created_at,
            fields,
        };
        docs.push(document.clone());
        Ok(document)
    }

    async fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, FolioError> {
        self.check(&self.counters.gets)?;
        Ok(self
            .lock()
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, FolioError> {
        self.check(&self.counters.lists)?;
        let mut docs = self.lock().get(&collection).cloned().unwrap_or_default();
        // Reversed first so seeded records sharing a timestamp list latest-inserted first.
        docs.reverse();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        mut fields: Map<String, Value>,
    ) -> Result<(), FolioError> {
        self.check(&self.counters.updates)?;
        fields.remove("id");
        fields.remove("createdAt");
        let mut collections = self.lock();
        let doc = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| FolioError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        doc.fields.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), FolioError> {
        self.check(&self.counters.deletes)?;
        if let Some(docs) = self.lock().get_mut(&collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }
}
