// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use std::sync::Arc;

use folio_catalog::Services;
use folio_config::FolioConfig;
use folio_core::{DocumentStore, Notifier, ObjectStore};
use folio_test_utils::{MockDocumentStore, MockNotifier, MockObjectStore};

pub struct Fixture {
    pub services: Services,
    pub documents: Arc<MockDocumentStore>,
    pub objects: Arc<MockObjectStore>,
    pub notifier: Arc<MockNotifier>,
}

pub fn fixture_with(config: &FolioConfig, notifier: MockNotifier) -> Fixture {
    let documents = Arc::new(MockDocumentStore::new());
    let objects = Arc::new(MockObjectStore::new());
    let notifier = Arc::new(notifier);
    let services = Services::new(
        Arc::clone(&documents) as Arc<dyn DocumentStore>,
        Arc::clone(&objects) as Arc<dyn ObjectStore>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        config,
    );
    Fixture {
        services,
        documents,
        objects,
        notifier,
    }
}

pub fn fixture() -> Fixture {
    fixture_with(&FolioConfig::default(), MockNotifier::new())
}
