// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths, and complete mail credentials.

use crate::diagnostic::ConfigError;
use crate::model::FolioConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FolioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if let Some(token) = &config.admin.bearer_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "admin.bearer_token must not be empty when set".to_string(),
        });
    }

    // Bucket fields that are set must carry a value.
    for (key, value) in [
        ("bucket.name", &config.bucket.name),
        ("bucket.project_id", &config.bucket.project_id),
        ("bucket.credentials_path", &config.bucket.credentials_path),
        ("bucket.credentials_json", &config.bucket.credentials_json),
        ("bucket.access_token", &config.bucket.access_token),
    ] {
        if let Some(v) = value
            && v.trim().is_empty()
        {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty when set"),
            });
        }
    }

    for (key, url) in [
        ("bucket.api_base_url", &config.bucket.api_base_url),
        ("bucket.public_base_url", &config.bucket.public_base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{url}` must be an http(s) URL"),
            });
        }
    }

    if config.mail.enabled {
        for (key, value) in [
            ("mail.smtp_username", &config.mail.smtp_username),
            ("mail.smtp_password", &config.mail.smtp_password),
            ("mail.operator_address", &config.mail.operator_address),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                errors.push(ConfigError::Validation {
                    message: format!("{key} is required when mail.enabled = true"),
                });
            }
        }
        if config.mail.smtp_host.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "mail.smtp_host must not be empty".to_string(),
            });
        }
    }

    if config.intake.default_project_type.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "intake.default_project_type must not be empty".to_string(),
        });
    }

    if config.uploads.max_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "uploads.max_bytes must be greater than 0".to_string(),
        });
    }

    if config.uploads.allowed_mime_types.is_empty() {
        errors.push(ConfigError::Validation {
            message: "uploads.allowed_mime_types must not be empty".to_string(),
        });
    }

    for mime in &config.uploads.allowed_mime_types {
        let well_formed = mime
            .split_once('/')
            .is_some_and(|(top, sub)| !top.is_empty() && !sub.is_empty());
        if !well_formed {
            errors.push(ConfigError::Validation {
                message: format!("uploads.allowed_mime_types entry `{mime}` is not a MIME type"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
