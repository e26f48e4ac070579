// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Folio portfolio backend.
//!
//! This crate provides the adapter trait definitions, the error type, and the
//! domain records used throughout the workspace. The document store, object
//! store and notifier implementations all plug in through traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FolioError;
pub use types::{
    AdapterType, Collection, Document, HealthStatus, MediaItem, MediaKind, MediaPatch,
    Notification, PublicMediaItem, Stats, Submission, SubmissionKind, SubmissionStatus,
};

pub use traits::{DocumentStore, Notifier, ObjectStore, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folio_error_has_all_variants() {
        let _config = FolioError::Config("test".into());
        let _validation = FolioError::missing_fields(&["name"]);
        let _storage = FolioError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _object = FolioError::ObjectStore {
            message: "test".into(),
            source: None,
        };
        let _notify = FolioError::Notification {
            message: "test".into(),
            source: None,
        };
        let _not_found = FolioError::NotFound {
            collection: "reels".into(),
            id: "x".into(),
        };
        let _internal = FolioError::Internal("test".into());
    }

    #[test]
    fn adapter_type_round_trips() {
        use std::str::FromStr;

        for variant in [
            AdapterType::DocumentStore,
            AdapterType::ObjectStore,
            AdapterType::Notifier,
        ] {
            let s = variant.to_string();
            assert_eq!(AdapterType::from_str(&s).unwrap(), variant);
        }
    }

    #[test]
    fn all_adapter_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_document_store<T: DocumentStore>() {}
        fn _assert_object_store<T: ObjectStore>() {}
        fn _assert_notifier<T: Notifier>() {}
    }
}
