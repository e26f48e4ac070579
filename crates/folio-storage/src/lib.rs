// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Folio portfolio backend.
//!
//! Provides a WAL-mode SQLite document store with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`. Records of every
//! collection live in one table as JSON objects keyed by `(collection, id)`.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteDocumentStore;
pub use database::Database;
