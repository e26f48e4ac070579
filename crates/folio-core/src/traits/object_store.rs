// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object store adapter trait for binary payloads.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;

/// A bucket-style blob store with publicly addressable objects.
#[async_trait]
pub trait ObjectStore: PluginAdapter {
    /// Writes `data` at `path` with the given content type, replacing any
    /// existing object at that path.
    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> Result<(), FolioError>;

    /// Grants anonymous read access to the object at `path`.
    async fn make_public(&self, path: &str) -> Result<(), FolioError>;

    /// Deletes the object at `path`.
    async fn delete(&self, path: &str) -> Result<(), FolioError>;

    /// Derives the public URL of `path`. Pure; performs no I/O.
    fn public_url(&self, path: &str) -> String;

    /// Recovers the object path from a URL produced by
    /// [`public_url`](ObjectStore::public_url).
    ///
    /// Returns `None` when the URL does not point into this store.
    fn path_from_url(&self, url: &str) -> Option<String>;
}
