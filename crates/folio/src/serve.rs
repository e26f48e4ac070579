// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio serve`: wire the concrete adapters and run the HTTP server.

use std::sync::Arc;

use folio_bucket::GcsBucket;
use folio_catalog::Services;
use folio_config::FolioConfig;
use folio_core::{DocumentStore, FolioError, ObjectStore, PluginAdapter};
use folio_gateway::{AppState, start_server};
use folio_storage::SqliteDocumentStore;
use tracing::{info, warn};

use crate::shutdown;

/// Run the server until SIGINT/SIGTERM, then close the document store.
pub async fn run_serve(config: FolioConfig) -> Result<(), FolioError> {
    init_tracing(&config.server.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "starting folio");

    let sqlite = SqliteDocumentStore::new(config.storage.clone());
    sqlite.initialize().await?;
    let store: Arc<dyn DocumentStore> = Arc::new(sqlite);
    info!(path = %config.storage.database_path, "document store ready");

    let objects: Arc<dyn ObjectStore> = Arc::new(GcsBucket::from_config(&config.bucket)?);
    let notifier = folio_mail::notifier_from_config(&config.mail)?;
    info!(notifier = notifier.name(), "notifier ready");

    let services = Services::new(Arc::clone(&store), objects, notifier, &config);
    let state = AppState::new(services, Arc::clone(&store), &config);
    if state.auth.bearer_token.is_none() {
        warn!("admin.bearer_token is not set; admin endpoints will reject every request");
    }

    let cancel = shutdown::install_signal_handler();
    let served = start_server(&config.server, state, cancel).await;

    if let Err(e) = store.close().await {
        warn!(error = %e, "document store did not close cleanly");
    }
    served
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("folio={log_level},tower_http=info,warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
