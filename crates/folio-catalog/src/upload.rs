// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media upload pipeline: admission check, object write, public ACL, record.
//!
//! The steps run strictly in order and the record is written last, so a
//! failed upload or ACL change never leaves a record pointing at a missing
//! or private object. A failed record write after a successful upload does
//! leave an orphaned object behind; it is logged and not reconciled.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use folio_config::model::UploadsConfig;
use folio_core::{DocumentStore, FolioError, MediaItem, MediaKind, ObjectStore};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::records::RecordSet;

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub bytes: Bytes,
    pub original_name: String,
    pub mime_type: String,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Descriptive fields sent alongside the file. Blank values fall back to
/// the kind's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tech: Option<String>,
}

/// Admission rules applied before any network call.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    pub allowed_mime_types: Vec<String>,
    pub unique_suffix: bool,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::from(&UploadsConfig::default())
    }
}

impl From<&UploadsConfig> for UploadPolicy {
    fn from(config: &UploadsConfig) -> Self {
        Self {
            max_bytes: config.max_bytes,
            allowed_mime_types: config.allowed_mime_types.clone(),
            unique_suffix: config.unique_suffix,
        }
    }
}

impl UploadPolicy {
    /// Reject a missing file, a MIME type outside the allow-list or an
    /// oversized payload.
    pub fn admit<'a>(
        &self,
        file: Option<&'a UploadFile>,
    ) -> Result<&'a UploadFile, FolioError> {
        let file = file.ok_or_else(|| FolioError::invalid_field("file", "No file uploaded."))?;

        let mime = normalized_mime(&file.mime_type);
        if !self
            .allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(&mime))
        {
            return Err(FolioError::invalid_field(
                "file",
                format!("File type `{}` is not allowed.", file.mime_type),
            ));
        }
        if file.size() > self.max_bytes {
            return Err(FolioError::invalid_field(
                "file",
                format!("File exceeds the {} byte limit.", self.max_bytes),
            ));
        }
        Ok(file)
    }
}

/// MIME type as compared against the allow-list and recorded.
pub fn normalized_mime(mime_type: &str) -> String {
    mime_type.trim().to_ascii_lowercase()
}

/// Object path `{collection}/{epoch_millis}-{name}`, with an optional token
/// between the timestamp and the name.
///
/// Path separators in the name are replaced so the object always lands
/// directly under the collection prefix.
pub fn object_path(
    kind: MediaKind,
    epoch_millis: i64,
    original_name: &str,
    token: Option<&str>,
) -> String {
    let name: String = original_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let name = if name.trim().is_empty() { "file".to_string() } else { name };
    match token {
        Some(token) => format!("{}/{epoch_millis}-{token}-{name}", kind.collection()),
        None => format!("{}/{epoch_millis}-{name}", kind.collection()),
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Stores uploaded files and records them in the media catalogs.
pub struct MediaPipeline {
    reels: RecordSet<MediaItem>,
    web_designs: RecordSet<MediaItem>,
    objects: Arc<dyn ObjectStore>,
    policy: UploadPolicy,
}

impl MediaPipeline {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            reels: RecordSet::new(Arc::clone(&store), MediaKind::Reel.collection()),
            web_designs: RecordSet::new(store, MediaKind::WebDesign.collection()),
            objects,
            policy,
        }
    }

    fn records(&self, kind: MediaKind) -> &RecordSet<MediaItem> {
        match kind {
            MediaKind::Reel => &self.reels,
            MediaKind::WebDesign => &self.web_designs,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Run the pipeline and return the stored item with its public URL.
    pub async fn upload(
        &self,
        kind: MediaKind,
        file: Option<UploadFile>,
        metadata: MediaMetadata,
    ) -> Result<MediaItem, FolioError> {
        let file = self.policy.admit(file.as_ref())?;
        let mime_type = normalized_mime(&file.mime_type);

        let token = self
            .policy
            .unique_suffix
            .then(|| uuid::Uuid::new_v4().simple().to_string()[..8].to_string());
        let path = object_path(
            kind,
            Utc::now().timestamp_millis(),
            &file.original_name,
            token.as_deref(),
        );

        self.objects
            .put(&path, file.bytes.clone(), &mime_type)
            .await?;
        self.objects.make_public(&path).await?;
        let url = self.objects.public_url(&path);

        let mut fields = Map::new();
        fields.insert(
            "title".into(),
            Value::String(or_default(metadata.title, kind.default_title())),
        );
        fields.insert(
            "category".into(),
            Value::String(or_default(metadata.category, kind.default_category())),
        );
        let tech = metadata
            .tech
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| kind.default_tech().map(str::to_string));
        if let Some(tech) = tech {
            fields.insert("tech".into(), Value::String(tech));
        }
        fields.insert("filename".into(), Value::String(file.original_name.clone()));
        fields.insert("mimetype".into(), Value::String(mime_type));
        fields.insert("size".into(), Value::from(file.size()));
        fields.insert("url".into(), Value::String(url));
        fields.insert("storagePath".into(), Value::String(path.clone()));
        fields.insert("isActive".into(), Value::Bool(true));

        let item = self.records(kind).create(fields).await.inspect_err(|e| {
            error!(
                path = %path,
                error = %e,
                "object uploaded but record write failed; object is orphaned"
            );
        })?;
        info!(
            collection = %kind.collection(),
            id = %item.id,
            path = %path,
            size = item.size,
            "media uploaded"
        );
        Ok(item)
    }
}
