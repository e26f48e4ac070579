// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain services of the Folio portfolio backend.
//!
//! Submissions and media items are both handled through the generic
//! [`RecordSet`], keyed by collection, so the application/contact and
//! reel/web-design pairs share one implementation each.

pub mod catalog;
pub mod intake;
pub mod records;
pub mod stats;
pub mod upload;

use std::sync::Arc;

use folio_config::FolioConfig;
use folio_core::{DocumentStore, Notifier, ObjectStore};
use folio_mail::NotificationDispatcher;

pub use catalog::{CatalogService, MediaListing, Scope};
pub use intake::{IntakePolicy, IntakeService, SubmissionInput};
pub use records::{Record, RecordSet};
pub use stats::StatsService;
pub use upload::{MediaMetadata, MediaPipeline, UploadFile, UploadPolicy};

/// Every service, wired to the same collaborators.
#[derive(Clone)]
pub struct Services {
    pub intake: Arc<IntakeService>,
    pub uploads: Arc<MediaPipeline>,
    pub catalog: Arc<CatalogService>,
    pub stats: Arc<StatsService>,
}

impl Services {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        notifier: Arc<dyn Notifier>,
        config: &FolioConfig,
    ) -> Self {
        let dispatcher = NotificationDispatcher::new(notifier);
        Self {
            intake: Arc::new(IntakeService::new(
                Arc::clone(&store),
                dispatcher,
                IntakePolicy::from(&config.intake),
            )),
            uploads: Arc::new(MediaPipeline::new(
                Arc::clone(&store),
                Arc::clone(&objects),
                UploadPolicy::from(&config.uploads),
            )),
            catalog: Arc::new(CatalogService::new(Arc::clone(&store), objects)),
            stats: Arc::new(StatsService::new(store)),
        }
    }
}
