// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory object store for deterministic testing.
//!
//! Public URLs follow the real bucket contract (via [`ObjectUrl`]) so URL
//! parsing on delete is exercised exactly as in production.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use folio_bucket::ObjectUrl;
use folio_core::{AdapterType, FolioError, HealthStatus, ObjectStore, PluginAdapter};

/// Public base used by mock URLs.
pub const MOCK_PUBLIC_BASE: &str = "https://storage.googleapis.com";
/// Bucket name used by mock URLs.
pub const MOCK_BUCKET: &str = "test-bucket";

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub public: bool,
}

/// A mock object store with per-operation counters and failure toggles.
pub struct MockObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    urls: ObjectUrl,
    puts: AtomicUsize,
    acl_changes: AtomicUsize,
    deletes: AtomicUsize,
    fail_put: AtomicBool,
    fail_make_public: AtomicBool,
    fail_delete: AtomicBool,
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn failure(op: &str) -> FolioError {
    FolioError::ObjectStore {
        message: format!("mock {op} failure"),
        source: None,
    }
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            urls: ObjectUrl::new(MOCK_PUBLIC_BASE, MOCK_BUCKET)
                .expect("mock public base is a valid URL"),
            puts: AtomicUsize::new(0),
            acl_changes: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            fail_put: AtomicBool::new(false),
            fail_make_public: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredObject>> {
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn fail_make_public(&self, fail: bool) {
        self.fail_make_public.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn make_public_count(&self) -> usize {
        self.acl_changes.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.put_count() + self.make_public_count() + self.delete_count()
    }

    pub fn object(&self, path: &str) -> Option<StoredObject> {
        self.lock().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.lock().keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl PluginAdapter for MockObjectStore {
    fn name(&self) -> &str {
        "mock-objects"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ObjectStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> Result<(), FolioError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(failure("put"));
        }
        self.lock().insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
                public: false,
            },
        );
        Ok(())
    }

    async fn make_public(&self, path: &str) -> Result<(), FolioError> {
        self.acl_changes.fetch_add(1, Ordering::SeqCst);
        if self.fail_make_public.load(Ordering::SeqCst) {
            return Err(failure("make_public"));
        }
        match self.lock().get_mut(path) {
            Some(object) => {
                object.public = true;
                Ok(())
            }
            None => Err(failure("make_public on missing object")),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), FolioError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(failure("delete"));
        }
        self.lock().remove(path);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.urls.url_for(path)
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        self.urls.path_of(url)
    }
}
