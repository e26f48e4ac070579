// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-continue delivery of notifications.

use std::sync::Arc;

use folio_core::{Notification, Notifier};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Hands notifications to a background task so callers never wait on delivery.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Spawn delivery and return immediately.
    ///
    /// The outcome is only logged. The returned handle exists for tests and
    /// shutdown draining; dropping it detaches the task.
    pub fn dispatch(&self, notification: Notification) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            match notifier.notify(&notification).await {
                Ok(()) => debug!(subject = %notification.subject, "notification delivered"),
                Err(e) => warn!(
                    subject = %notification.subject,
                    notifier = notifier.name(),
                    error = %e,
                    "submission stored; notification failed"
                ),
            }
        })
    }
}
