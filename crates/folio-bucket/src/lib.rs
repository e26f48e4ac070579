// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Cloud Storage adapter for the Folio portfolio backend.
//!
//! Implements [`ObjectStore`](folio_core::ObjectStore) over the Cloud Storage
//! JSON API: media uploads, public-read ACL grants and deletions. Public URLs
//! are derived from the bucket name and object path, and can be parsed back
//! into the path (see [`url::ObjectUrl`]).

pub mod client;
pub mod credentials;
pub mod url;

pub use client::GcsBucket;
pub use credentials::{ServiceAccountKey, TokenSource};
pub use url::ObjectUrl;
