// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard counts.
//!
//! Counts are computed by fetching each collection in full and counting in
//! memory. That is fine at portfolio volumes and does not scale.

use std::sync::Arc;

use folio_core::{Collection, Document, DocumentStore, FolioError, Stats, SubmissionKind};

pub struct StatsService {
    store: Arc<dyn DocumentStore>,
}

/// Records still in their kind's initial status. A missing status counts as initial.
fn count_open(documents: &[Document], kind: SubmissionKind) -> usize {
    let initial = kind.initial_status().to_string();
    documents
        .iter()
        .filter(|doc| doc.str_field("status").unwrap_or(&initial) == initial)
        .count()
}

impl StatsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn collect(&self) -> Result<Stats, FolioError> {
        let (applications, contacts, reels, web_designs) = tokio::try_join!(
            self.store.list(Collection::Applications),
            self.store.list(Collection::Contacts),
            self.store.list(Collection::Reels),
            self.store.list(Collection::WebDesigns),
        )?;

        Ok(Stats {
            total_applications: applications.len(),
            total_contacts: contacts.len(),
            pending_applications: count_open(&applications, SubmissionKind::Application),
            unread_contacts: count_open(&contacts, SubmissionKind::Contact),
            total_reels: reels.len(),
            total_web_designs: web_designs.len(),
        })
    }
}
