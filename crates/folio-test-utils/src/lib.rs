// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Folio integration tests.
//!
//! Provides in-memory adapters and a test harness for fast, deterministic
//! tests without a real database, bucket or mail relay.
//!
//! # Components
//!
//! - [`MockDocumentStore`] - in-memory document store with call counters and failure toggles
//! - [`MockObjectStore`] - in-memory bucket honoring the public URL contract
//! - [`MockNotifier`] - records notifications, optionally failing or slow
//! - [`TestHarness`] - full router over the mocks (or a temp SQLite database)

pub mod harness;
pub mod mock_document_store;
pub mod mock_notifier;
pub mod mock_object_store;

pub use harness::{ADMIN_TOKEN, TestFile, TestHarness, TestResponse};
pub use mock_document_store::MockDocumentStore;
pub use mock_notifier::MockNotifier;
pub use mock_object_store::MockObjectStore;
