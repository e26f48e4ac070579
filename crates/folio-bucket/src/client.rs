// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cloud Storage JSON API client implementing [`ObjectStore`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use tracing::{debug, info};

use folio_config::model::BucketConfig;
use folio_core::{AdapterType, FolioError, HealthStatus, ObjectStore, PluginAdapter};

use crate::credentials::{ServiceAccountKey, TokenSource};
use crate::url::ObjectUrl;

/// Object store backed by a Google Cloud Storage bucket.
#[derive(Debug)]
pub struct GcsBucket {
    http: reqwest::Client,
    api_base: Url,
    urls: ObjectUrl,
    auth: TokenSource,
}

impl GcsBucket {
    /// Create a client for `bucket`.
    pub fn new(
        bucket: &str,
        api_base_url: &str,
        public_base_url: &str,
        auth: TokenSource,
    ) -> Result<Self, FolioError> {
        let api_base = Url::parse(api_base_url).map_err(|e| {
            FolioError::Config(format!("invalid storage API URL `{api_base_url}`: {e}"))
        })?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FolioError::ObjectStore {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            http,
            api_base,
            urls: ObjectUrl::new(public_base_url, bucket)?,
            auth,
        })
    }

    /// Build a client from the `[bucket]` config section.
    ///
    /// Credentials are taken from `credentials_json`, then `credentials_path`,
    /// then `access_token`; with none of them requests are sent unauthenticated.
    /// The key's project id is used for the bucket-name fallback when
    /// `project_id` is not configured.
    pub fn from_config(config: &BucketConfig) -> Result<Self, FolioError> {
        let key = match (&config.credentials_json, &config.credentials_path) {
            (Some(json), _) => Some(ServiceAccountKey::from_json(json)?),
            (None, Some(path)) => Some(ServiceAccountKey::from_file(path)?),
            (None, None) => None,
        };

        let bucket = config
            .resolved_name()
            .or_else(|| {
                key.as_ref()
                    .and_then(|k| k.project_id.as_ref())
                    .map(|p| format!("{p}.firebasestorage.app"))
            })
            .ok_or_else(|| {
                FolioError::Config(
                    "no bucket configured: set bucket.name or bucket.project_id".into(),
                )
            })?;

        let auth = match (key, &config.access_token) {
            (Some(key), _) => TokenSource::service_account(key),
            (None, Some(token)) => TokenSource::Static(token.clone()),
            (None, None) => TokenSource::Anonymous,
        };
        info!(bucket = %bucket, auth = ?auth, "object store configured");

        Self::new(&bucket, &config.api_base_url, &config.public_base_url, auth)
    }

    pub fn bucket_name(&self) -> &str {
        self.urls.bucket()
    }

    /// `{api_base}/<segments...>`, each segment percent-encoded as a unit.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, FolioError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FolioError::Config(format!(
                    "storage API URL `{}` cannot be a base",
                    self.api_base
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn object_endpoint(&self, path: &str, suffix: &[&str]) -> Result<Url, FolioError> {
        let bucket = self.bucket_name();
        self.endpoint(
            ["storage", "v1", "b", bucket, "o", path]
                .into_iter()
                .chain(suffix.iter().copied()),
        )
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response, FolioError> {
        let request = match self.auth.bearer(&self.http).await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request.send().await.map_err(|e| FolioError::ObjectStore {
            message: format!("{action} request failed: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn expect_success(response: Response, action: &str) -> Result<(), FolioError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(FolioError::ObjectStore {
            message: format!("{action} failed with {status}: {body}"),
            source: None,
        })
    }
}

#[async_trait]
impl PluginAdapter for GcsBucket {
    fn name(&self) -> &str {
        "gcs"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ObjectStore
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        let url = self.endpoint(["storage", "v1", "b", self.bucket_name()])?;
        let response = self.send(self.http.get(url), "bucket lookup").await?;
        let status = response.status();
        Ok(if status.is_success() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy(format!("bucket lookup returned {status}"))
        })
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for GcsBucket {
    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> Result<(), FolioError> {
        let mut url = self.endpoint(["upload", "storage", "v1", "b", self.bucket_name(), "o"])?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", path);
        let size = data.len();

        let request = self
            .http
            .request(Method::POST, url)
            .header("content-type", content_type)
            .body(data);
        let response = self.send(request, "upload").await?;
        Self::expect_success(response, "upload").await?;
        debug!(path, size, content_type, "object uploaded");
        Ok(())
    }

    async fn make_public(&self, path: &str) -> Result<(), FolioError> {
        let url = self.object_endpoint(path, &["acl"])?;
        let request = self
            .http
            .post(url)
            .json(&serde_json::json!({ "entity": "allUsers", "role": "READER" }));
        let response = self.send(request, "ACL update").await?;
        Self::expect_success(response, "ACL update").await?;
        debug!(path, "object made public");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), FolioError> {
        let url = self.object_endpoint(path, &[])?;
        let response = self.send(self.http.delete(url), "delete").await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "object already absent");
            return Ok(());
        }
        Self::expect_success(response, "delete").await?;
        debug!(path, "object deleted");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.urls.url_for(path)
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        self.urls.path_of(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_falls_back_to_project_bucket() {
        let config = BucketConfig {
            project_id: Some("my-site".into()),
            ..Default::default()
        };
        let bucket = GcsBucket::from_config(&config).unwrap();
        assert_eq!(bucket.bucket_name(), "my-site.firebasestorage.app");
        assert!(matches!(bucket.auth, TokenSource::Anonymous));
    }

    #[test]
    fn from_config_without_any_bucket_is_an_error() {
        let err = GcsBucket::from_config(&BucketConfig::default()).unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn static_token_is_selected_without_key() {
        let config = BucketConfig {
            name: Some("bkt".into()),
            access_token: Some("ya29.t".into()),
            ..Default::default()
        };
        let bucket = GcsBucket::from_config(&config).unwrap();
        assert!(matches!(bucket.auth, TokenSource::Static(_)));
    }

    #[test]
    fn object_endpoint_encodes_slashes_in_name() {
        let bucket = GcsBucket::new(
            "bkt",
            "https://storage.googleapis.com",
            "https://storage.googleapis.com",
            TokenSource::Anonymous,
        )
        .unwrap();
        let url = bucket.object_endpoint("reels/1-a b.mp4", &["acl"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://storage.googleapis.com/storage/v1/b/bkt/o/reels%2F1-a%20b.mp4/acl"
        );
    }

    #[test]
    fn public_url_round_trips_through_trait() {
        let bucket = GcsBucket::new(
            "bkt",
            "https://storage.googleapis.com",
            "https://storage.googleapis.com",
            TokenSource::Anonymous,
        )
        .unwrap();
        let url = bucket.public_url("webdesigns/9-home.png");
        assert_eq!(
            bucket.path_from_url(&url).as_deref(),
            Some("webdesigns/9-home.png")
        );
    }
}
