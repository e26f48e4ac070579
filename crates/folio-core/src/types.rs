// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits, services, and the gateway.
//!
//! Records serialize with camelCase keys (`createdAt`, `isActive`, ...) since
//! the same shape is persisted in the document store and returned over HTTP.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::error::FolioError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Identifies the kind of external collaborator an adapter talks to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    DocumentStore,
    ObjectStore,
    Notifier,
}

/// A named group of same-shaped records in the document store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Applications,
    Contacts,
    Reels,
    WebDesigns,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Applications,
        Collection::Contacts,
        Collection::Reels,
        Collection::WebDesigns,
    ];

    /// Collection name as stored and as used in URL paths and object paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Applications => "applications",
            Collection::Contacts => "contacts",
            Collection::Reels => "reels",
            Collection::WebDesigns => "webdesigns",
        }
    }
}

// --- Submissions ---

/// The two public form flows. Doubles as the `type` discriminator on records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Application,
    Contact,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 2] = [SubmissionKind::Application, SubmissionKind::Contact];

    pub fn collection(&self) -> Collection {
        match self {
            SubmissionKind::Application => Collection::Applications,
            SubmissionKind::Contact => Collection::Contacts,
        }
    }

    /// The kind whose records live in `collection`, if any.
    pub fn for_collection(collection: Collection) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.collection() == collection)
    }

    /// Status assigned on creation.
    pub fn initial_status(&self) -> SubmissionStatus {
        match self {
            SubmissionKind::Application => SubmissionStatus::Pending,
            SubmissionKind::Contact => SubmissionStatus::Unread,
        }
    }

    /// The closed set of statuses a record of this kind may hold.
    pub fn statuses(&self) -> &'static [SubmissionStatus] {
        match self {
            SubmissionKind::Application => &[
                SubmissionStatus::Pending,
                SubmissionStatus::Reviewed,
                SubmissionStatus::Accepted,
                SubmissionStatus::Rejected,
            ],
            SubmissionKind::Contact => &[
                SubmissionStatus::Unread,
                SubmissionStatus::Read,
                SubmissionStatus::Replied,
                SubmissionStatus::Archived,
            ],
        }
    }

    pub fn allows(&self, status: SubmissionStatus) -> bool {
        self.statuses().contains(&status)
    }
}

/// Review state of a submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
    Unread,
    Read,
    Replied,
    Archived,
}

/// A persisted contact or application form entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SubmissionKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

// --- Media ---

/// The two media catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Reel,
    WebDesign,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Reel, MediaKind::WebDesign];

    pub fn collection(&self) -> Collection {
        match self {
            MediaKind::Reel => Collection::Reels,
            MediaKind::WebDesign => Collection::WebDesigns,
        }
    }

    /// Human label used in response messages ("Reel deleted.").
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Reel => "reel",
            MediaKind::WebDesign => "web design",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            MediaKind::Reel => "Untitled Reel",
            MediaKind::WebDesign => "Untitled Design",
        }
    }

    pub fn default_category(&self) -> &'static str {
        match self {
            MediaKind::Reel => "General",
            MediaKind::WebDesign => "Web Design",
        }
    }

    /// Reels carry no tech tag; web designs default to "React".
    pub fn default_tech(&self) -> Option<&'static str> {
        match self {
            MediaKind::Reel => None,
            MediaKind::WebDesign => Some("React"),
        }
    }
}

/// A persisted metadata record describing an uploaded file and its public URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    pub filename: String,
    pub mimetype: String,
    pub size: u64,
    pub url: String,
    /// Object-store path the URL was derived from. Absent on legacy records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The public-safe projection of a [`MediaItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMediaItem {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    pub url: String,
    pub mimetype: String,
}

impl From<&MediaItem> for PublicMediaItem {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            category: item.category.clone(),
            tech: item.tech.clone(),
            url: item.url.clone(),
            mimetype: item.mimetype.clone(),
        }
    }
}

/// Partial administrative update of a media record.
///
/// Strings are applied only when present and non-empty; `isActive` is applied
/// whenever it is present so it can be set to `false`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPatch {
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tech: Option<String>,
}

impl MediaPatch {
    /// Converts the patch into the document fields that should be written.
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(active) = self.is_active {
            fields.insert("isActive".into(), Value::Bool(active));
        }
        for (key, value) in [
            ("title", self.title),
            ("category", self.category),
            ("tech", self.tech),
        ] {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                fields.insert(key.into(), Value::String(v));
            }
        }
        fields
    }
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_applications: usize,
    pub total_contacts: usize,
    pub pending_applications: usize,
    pub unread_contacts: usize,
    pub total_reels: usize,
    pub total_web_designs: usize,
}

// --- Documents ---

/// A raw record as held by a document store.
///
/// `id` and `created_at` are assigned by the store; `fields` holds everything
/// else and never contains the `id` or `createdAt` keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Decodes the document into a typed record, folding in `id` and `createdAt`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, FolioError> {
        let mut map = self.fields;
        map.insert("id".into(), Value::String(self.id));
        map.insert(
            "createdAt".into(),
            Value::String(format_timestamp(&self.created_at)),
        );
        serde_json::from_value(Value::Object(map)).map_err(FolioError::storage)
    }

    /// Reads a string field, if present.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Formats a timestamp as fixed-width RFC 3339 with microseconds, so that
/// lexical order equals chronological order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// --- Notifications ---

/// An outbound operator notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    /// Address replies should go to (the submitter).
    pub reply_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn collection_names_round_trip() {
        for c in Collection::ALL {
            assert_eq!(c.to_string(), c.as_str());
            assert_eq!(Collection::from_str(c.as_str()).unwrap(), c);
        }
        assert_eq!(Collection::WebDesigns.as_str(), "webdesigns");
    }

    #[test]
    fn submission_kind_for_collection() {
        assert_eq!(
            SubmissionKind::for_collection(Collection::Contacts),
            Some(SubmissionKind::Contact)
        );
        assert_eq!(
            SubmissionKind::for_collection(Collection::Applications),
            Some(SubmissionKind::Application)
        );
        assert_eq!(SubmissionKind::for_collection(Collection::Reels), None);
    }

    #[test]
    fn submission_kinds_have_disjoint_status_sets() {
        assert!(SubmissionKind::Application.allows(SubmissionStatus::Pending));
        assert!(!SubmissionKind::Application.allows(SubmissionStatus::Unread));
        assert!(SubmissionKind::Contact.allows(SubmissionStatus::Read));
        assert!(!SubmissionKind::Contact.allows(SubmissionStatus::Accepted));
        for kind in SubmissionKind::ALL {
            assert!(kind.allows(kind.initial_status()));
        }
    }

    #[test]
    fn status_parses_lowercase() {
        assert_eq!(
            SubmissionStatus::from_str("reviewed").unwrap(),
            SubmissionStatus::Reviewed
        );
        assert!(SubmissionStatus::from_str("bogus").is_err());
    }

    #[test]
    fn media_patch_skips_empty_strings_but_keeps_false() {
        let patch = MediaPatch {
            is_active: Some(false),
            title: Some(String::new()),
            category: Some("Motion".into()),
            tech: None,
        };
        let fields = patch.into_fields();
        assert_eq!(fields.get("isActive"), Some(&Value::Bool(false)));
        assert_eq!(fields.get("category"), Some(&Value::String("Motion".into())));
        assert!(!fields.contains_key("title"));
        assert!(!fields.contains_key("tech"));
    }

    #[test]
    fn media_patch_deserializes_camel_case() {
        let patch: MediaPatch = serde_json::from_str(r#"{"isActive": true}"#).unwrap();
        assert_eq!(patch.is_active, Some(true));
        assert!(patch.title.is_none());
    }

    #[test]
    fn document_decodes_into_submission() {
        let mut fields = Map::new();
        fields.insert("type".into(), "application".into());
        fields.insert("name".into(), "A".into());
        fields.insert("email".into(), "a@x.com".into());
        fields.insert("message".into(), "m".into());
        fields.insert("projectType".into(), "Web Design".into());
        fields.insert("status".into(), "pending".into());
        let doc = Document {
            id: "doc-1".into(),
            created_at: Utc::now(),
            fields,
        };
        let created_at = doc.created_at;
        let submission: Submission = doc.decode().unwrap();
        assert_eq!(submission.id, "doc-1");
        assert_eq!(submission.kind, SubmissionKind::Application);
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.project_type.as_deref(), Some("Web Design"));
        assert_eq!(
            submission.created_at.timestamp_micros(),
            created_at.timestamp_micros()
        );
    }

    #[test]
    fn public_projection_drops_private_fields() {
        let item = MediaItem {
            id: "r1".into(),
            title: "T".into(),
            category: "C".into(),
            tech: None,
            filename: "clip.mp4".into(),
            mimetype: "video/mp4".into(),
            size: 42,
            url: "https://storage.googleapis.com/b/reels/1-clip.mp4".into(),
            storage_path: Some("reels/1-clip.mp4".into()),
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(PublicMediaItem::from(&item)).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["filename", "size", "createdAt", "isActive", "storagePath", "tech"] {
            assert!(!obj.contains_key(key), "{key} leaked into public projection");
        }
        assert_eq!(obj["mimetype"], "video/mp4");
    }

    #[test]
    fn stats_serialize_with_dashboard_keys() {
        let json = serde_json::to_string(&Stats::default()).unwrap();
        assert!(json.contains("\"totalWebDesigns\":0"));
        assert!(json.contains("\"pendingApplications\":0"));
    }

    #[test]
    fn timestamps_format_fixed_width() {
        let ts = DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&ts), "2026-01-01T00:00:00.000000Z");
    }
}
