// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` so they can be held as `Arc<dyn ...>` and swapped for
//! fakes in tests.

pub mod adapter;
pub mod document_store;
pub mod notifier;
pub mod object_store;

pub use adapter::PluginAdapter;
pub use document_store::DocumentStore;
pub use notifier::Notifier;
pub use object_store::ObjectStore;
