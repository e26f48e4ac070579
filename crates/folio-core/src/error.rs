// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Folio backend.

use thiserror::Error;

/// The primary error type used across all Folio adapter traits and services.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller-supplied input was rejected before any external call was made.
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        /// Names of the offending fields, in the order they were checked.
        fields: Vec<String>,
    },

    /// Document store errors (connection, query failure, (de)serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Object store errors (upload, ACL change, deletion, authentication).
    #[error("object store error: {message}")]
    ObjectStore {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Outbound notification errors (mail relay unreachable, bad address).
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The addressed record does not exist.
    #[error("record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FolioError {
    /// Builds a validation error naming every missing required field.
    pub fn missing_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
        FolioError::Validation {
            message: format!("missing required fields: {}", fields.join(", ")),
            fields,
        }
    }

    /// Builds a validation error for a single field with a custom message.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        FolioError::Validation {
            message: message.into(),
            fields: vec![field.to_string()],
        }
    }

    /// Wraps any error as a storage error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FolioError::Storage {
            source: Box::new(err),
        }
    }

    /// Returns true for errors caused by caller input rather than a backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, FolioError::Validation { .. })
    }
}
