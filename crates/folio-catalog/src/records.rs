// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed view over one document-store collection.

use std::marker::PhantomData;
use std::sync::Arc;

use folio_core::{
    Collection, Document, DocumentStore, FolioError, MediaItem, Submission, SubmissionKind,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// A record type stored in a [`RecordSet`].
pub trait Record: DeserializeOwned {
    /// Fill fields that older writers left out, before decoding.
    fn backfill(_collection: Collection, _fields: &mut Map<String, Value>) {}
}

impl Record for MediaItem {}

impl Record for Submission {
    /// Older contact records carry neither `type` nor `status`, and older
    /// applications carry no `type`. Both follow from the collection.
    fn backfill(collection: Collection, fields: &mut Map<String, Value>) {
        let Some(kind) = SubmissionKind::for_collection(collection) else {
            return;
        };
        fields
            .entry("type")
            .or_insert_with(|| Value::String(kind.to_string()));
        fields
            .entry("status")
            .or_insert_with(|| Value::String(kind.initial_status().to_string()));
    }
}

/// CRUD over one collection, decoding documents into `T`.
pub struct RecordSet<T> {
    store: Arc<dyn DocumentStore>,
    collection: Collection,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordSet<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection,
            _record: PhantomData,
        }
    }
}

impl<T: Record> RecordSet<T> {
    pub fn new(store: Arc<dyn DocumentStore>, collection: Collection) -> Self {
        Self {
            store,
            collection,
            _record: PhantomData,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    fn decode(&self, mut document: Document) -> Result<T, FolioError> {
        T::backfill(self.collection, &mut document.fields);
        document.decode()
    }

    /// Insert a record built from `fields`; the store assigns `id` and `createdAt`.
    pub async fn create(&self, fields: Map<String, Value>) -> Result<T, FolioError> {
        let document = self.store.insert(self.collection, fields).await?;
        self.decode(document)
    }

    /// The raw document, for callers that must tolerate legacy shapes.
    pub async fn document(&self, id: &str) -> Result<Option<Document>, FolioError> {
        self.store.get(self.collection, id).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, FolioError> {
        self.document(id)
            .await?
            .map(|document| self.decode(document))
            .transpose()
    }

    /// All records, newest first. Documents that no longer decode are skipped.
    pub async fn list(&self) -> Result<Vec<T>, FolioError> {
        let documents = self.store.list(self.collection).await?;
        Ok(documents
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                self.decode(doc)
                    .inspect_err(|e| {
                        warn!(
                            collection = %self.collection,
                            id = %id,
                            error = %e,
                            "skipping undecodable record"
                        );
                    })
                    .ok()
            })
            .collect())
    }

    /// Merge `fields` into the record. `NotFound` if it does not exist.
    pub async fn patch(&self, id: &str, fields: Map<String, Value>) -> Result<(), FolioError> {
        self.store.update(self.collection, id, fields).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), FolioError> {
        self.store.delete(self.collection, id).await
    }
}
