// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store adapter trait.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Collection, Document};

/// A collection-oriented document database.
///
/// Implementations assign document ids and `created_at` timestamps at write
/// time. Within one collection, `created_at` never decreases with insertion
/// order, and [`list`](DocumentStore::list) returns newest first.
/// Each call is atomic on its own; no cross-document transactions exist.
#[async_trait]
pub trait DocumentStore: PluginAdapter {
    /// Prepares the backend (connections, migrations).
    async fn initialize(&self) -> Result<(), FolioError>;

    /// Flushes pending writes and releases the backend.
    async fn close(&self) -> Result<(), FolioError>;

    /// Inserts a new document and returns it with its assigned id and timestamp.
    async fn insert(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Document, FolioError>;

    /// Fetches one document, or `None` if it does not exist.
    async fn get(&self, collection: Collection, id: &str)
    -> Result<Option<Document>, FolioError>;

    /// Returns every document in the collection ordered by `created_at` descending.
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, FolioError>;

    /// Merges `fields` into an existing document.
    ///
    /// Returns [`FolioError::NotFound`] when the document does not exist.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), FolioError>;

    /// Deletes a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), FolioError>;
}
