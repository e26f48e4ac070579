// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Folio backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Default upload ceiling: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// MIME types accepted for uploads unless overridden.
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] = &[
    "video/mp4",
    "video/webm",
    "video/quicktime",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Top-level Folio configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Admin API authentication.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Document store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Object store (bucket) settings.
    #[serde(default)]
    pub bucket: BucketConfig,

    /// Mail relay settings for operator notifications.
    #[serde(default)]
    pub mail: MailConfig,

    /// Public form intake behavior.
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Media upload constraints.
    #[serde(default)]
    pub uploads: UploadsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Admin API authentication. With no token configured every admin request is rejected.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Bearer token expected in `Authorization: Bearer <token>`.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("folio").join("folio.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("folio.db"))
        .to_string_lossy()
        .into_owned()
}

/// Object store configuration (Google Cloud Storage).
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BucketConfig {
    /// Bucket name. Falls back to `<project_id>.firebasestorage.app`.
    #[serde(default)]
    pub name: Option<String>,

    /// Cloud project id.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Path to a service-account key file (JSON).
    #[serde(default)]
    pub credentials_path: Option<String>,

    /// Inline service-account key (JSON). Takes precedence over `credentials_path`.
    #[serde(default)]
    pub credentials_json: Option<String>,

    /// Pre-provisioned OAuth2 access token, used when no key is configured.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Base URL of the storage JSON API.
    #[serde(default = "default_storage_base_url")]
    pub api_base_url: String,

    /// Base URL public object URLs are derived from.
    #[serde(default = "default_storage_base_url")]
    pub public_base_url: String,
}

impl BucketConfig {
    /// The bucket name in effect, if one can be determined.
    pub fn resolved_name(&self) -> Option<String> {
        self.name.clone().or_else(|| {
            self.project_id
                .as_ref()
                .map(|p| format!("{p}.firebasestorage.app"))
        })
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            name: None,
            project_id: None,
            credentials_path: None,
            credentials_json: None,
            access_token: None,
            api_base_url: default_storage_base_url(),
            public_base_url: default_storage_base_url(),
        }
    }
}

impl std::fmt::Debug for BucketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketConfig")
            .field("name", &self.name)
            .field("project_id", &self.project_id)
            .field("credentials_path", &self.credentials_path)
            .field(
                "credentials_json",
                &self.credentials_json.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

fn default_storage_base_url() -> String {
    "https://storage.googleapis.com".to_string()
}

/// Mail relay configuration for operator notifications.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailConfig {
    /// Send notification emails for new submissions.
    #[serde(default)]
    pub enabled: bool,

    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP port. `None` uses the implicit-TLS submission port.
    #[serde(default)]
    pub smtp_port: Option<u16>,

    /// SMTP username.
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password (app password for Gmail).
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Sender address. Defaults to the SMTP username.
    #[serde(default)]
    pub from_address: Option<String>,

    /// Operator address that receives notifications.
    #[serde(default)]
    pub operator_address: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: None,
            smtp_username: None,
            smtp_password: None,
            from_address: None,
            operator_address: None,
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field(
                "smtp_password",
                &self.smtp_password.as_ref().map(|_| "[redacted]"),
            )
            .field("from_address", &self.from_address)
            .field("operator_address", &self.operator_address)
            .finish()
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

/// Public form intake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Reject submissions missing name, email or message before persisting.
    #[serde(default = "default_require_fields")]
    pub require_fields: bool,

    /// Project type recorded when an application omits one.
    #[serde(default = "default_project_type")]
    pub default_project_type: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            require_fields: default_require_fields(),
            default_project_type: default_project_type(),
        }
    }
}

fn default_require_fields() -> bool {
    true
}

fn default_project_type() -> String {
    "General".to_string()
}

/// Media upload constraints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UploadsConfig {
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Accepted MIME types.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,

    /// Insert a random token into object paths so same-millisecond uploads
    /// of identically named files cannot collide.
    #[serde(default)]
    pub unique_suffix: bool,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
            unique_suffix: false,
        }
    }
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_allowed_mime_types() -> Vec<String> {
    DEFAULT_ALLOWED_MIME_TYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_name_falls_back_to_project() {
        let mut bucket = BucketConfig {
            project_id: Some("my-site".into()),
            ..Default::default()
        };
        assert_eq!(
            bucket.resolved_name().as_deref(),
            Some("my-site.firebasestorage.app")
        );
        bucket.name = Some("explicit".into());
        assert_eq!(bucket.resolved_name().as_deref(), Some("explicit"));
    }

    #[test]
    fn bucket_without_name_or_project_has_no_name() {
        assert!(BucketConfig::default().resolved_name().is_none());
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut config = FolioConfig::default();
        config.admin.bearer_token = Some("admin-secret".into());
        config.mail.smtp_password = Some("mail-secret".into());
        config.bucket.access_token = Some("token-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("admin-secret"));
        assert!(!debug.contains("mail-secret"));
        assert!(!debug.contains("token-secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn upload_defaults_match_allow_list() {
        let uploads = UploadsConfig::default();
        assert_eq!(uploads.max_bytes, 104_857_600);
        assert_eq!(uploads.allowed_mime_types.len(), 7);
        assert!(!uploads.unique_suffix);
    }
}
