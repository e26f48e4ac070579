// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full router over mock adapters (or a temp
//! SQLite database) and drives it in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use folio_catalog::Services;
use folio_config::FolioConfig;
use folio_config::model::StorageConfig;
use folio_core::{DocumentStore, FolioError, Notifier, ObjectStore};
use folio_gateway::{AppState, build_router};
use folio_storage::SqliteDocumentStore;

use crate::mock_document_store::MockDocumentStore;
use crate::mock_notifier::MockNotifier;
use crate::mock_object_store::MockObjectStore;

/// Admin token the harness configures by default.
pub const ADMIN_TOKEN: &str = "test-admin-token";

const BOUNDARY: &str = "folio-test-boundary";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: FolioConfig,
    notifier: MockNotifier,
    sqlite: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = FolioConfig::default();
        config.admin.bearer_token = Some(ADMIN_TOKEN.to_string());
        Self {
            config,
            notifier: MockNotifier::new(),
            sqlite: false,
        }
    }

    /// Use a notifier whose every delivery fails.
    pub fn with_failing_notifier(mut self) -> Self {
        self.notifier = MockNotifier::failing();
        self
    }

    pub fn with_notifier(mut self, notifier: MockNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Configure the admin token; `None` leaves admin routes fail-closed.
    pub fn with_admin_token(mut self, token: Option<&str>) -> Self {
        self.config.admin.bearer_token = token.map(str::to_string);
        self
    }

    /// Back the harness with a SQLite database in a temp directory.
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    /// Adjust any other configuration.
    pub fn with_config(mut self, adjust: impl FnOnce(&mut FolioConfig)) -> Self {
        adjust(&mut self.config);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, FolioError> {
        let mut config = self.config;
        let mut temp_dir = None;
        let mut documents = None;

        let store: Arc<dyn DocumentStore> = if self.sqlite {
            let dir = tempfile::TempDir::new().map_err(FolioError::storage)?;
            config.storage = StorageConfig {
                database_path: dir.path().join("test.db").to_string_lossy().to_string(),
            };
            let sqlite = SqliteDocumentStore::new(config.storage.clone());
            sqlite.initialize().await?;
            temp_dir = Some(dir);
            Arc::new(sqlite)
        } else {
            let mock = Arc::new(MockDocumentStore::new());
            documents = Some(Arc::clone(&mock));
            mock
        };

        let objects = Arc::new(MockObjectStore::new());
        let notifier = Arc::new(self.notifier);

        let services = Services::new(
            Arc::clone(&store),
            Arc::clone(&objects) as Arc<dyn ObjectStore>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            &config,
        );
        let router = build_router(AppState::new(services.clone(), Arc::clone(&store), &config));

        Ok(TestHarness {
            router,
            services,
            store,
            documents,
            objects,
            notifier,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A decoded response.
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The envelope's `data` member (`Null` when absent).
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn message(&self) -> Option<&str> {
        self.body["message"].as_str()
    }

    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK && self.body["success"] == Value::Bool(true)
    }
}

/// A file part for [`TestHarness::upload`].
pub struct TestFile<'a> {
    pub name: &'a str,
    pub mime: &'a str,
    pub bytes: Vec<u8>,
}

/// Complete test environment over the full router.
pub struct TestHarness {
    router: Router,
    pub services: Services,
    pub store: Arc<dyn DocumentStore>,
    documents: Option<Arc<MockDocumentStore>>,
    pub objects: Arc<MockObjectStore>,
    pub notifier: Arc<MockNotifier>,
    pub config: FolioConfig,
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with every default: mock stores, working notifier, admin token set.
    pub async fn new() -> TestHarness {
        Self::builder()
            .build()
            .await
            .expect("default harness should build")
    }

    /// The in-memory document store. Panics on a SQLite-backed harness.
    pub fn documents(&self) -> &MockDocumentStore {
        self.documents
            .as_deref()
            .expect("harness was built with SQLite, not the mock store")
    }

    /// Send a request through the router and decode the JSON body.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse { status, body }
    }

    fn request(method: Method, path: &str, token: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn json(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> TestResponse {
        let request = Self::request(method, path, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build");
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Self::request(Method::GET, path, None)
            .body(Body::empty())
            .expect("request should build");
        self.send(request).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.json(Method::POST, path, None, body).await
    }

    /// GET with the admin token.
    pub async fn admin_get(&self, path: &str) -> TestResponse {
        let request = Self::request(Method::GET, path, Some(ADMIN_TOKEN))
            .body(Body::empty())
            .expect("request should build");
        self.send(request).await
    }

    pub async fn admin_patch(&self, path: &str, body: Value) -> TestResponse {
        self.json(Method::PATCH, path, Some(ADMIN_TOKEN), body).await
    }

    pub async fn admin_delete(&self, path: &str) -> TestResponse {
        let request = Self::request(Method::DELETE, path, Some(ADMIN_TOKEN))
            .body(Body::empty())
            .expect("request should build");
        self.send(request).await
    }

    /// Multipart POST with the admin token: an optional `file` part plus text parts.
    pub async fn upload(
        &self,
        path: &str,
        file: Option<TestFile<'_>>,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let request = Self::request(Method::POST, path, Some(ADMIN_TOKEN))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(file, fields)))
            .expect("request should build");
        self.send(request).await
    }
}

/// Encode a multipart/form-data body.
pub fn multipart_body(file: Option<TestFile<'_>>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.name, file.mime
            )
            .as_bytes(),
        );
        body.extend_from_slice(&file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
