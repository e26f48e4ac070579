// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator notifications for new submissions.
//!
//! Notifications are best-effort: the [`NotificationDispatcher`] hands each
//! one to a background task and only logs the outcome, so a slow or broken
//! mail relay never affects the request that triggered it.

pub mod compose;
pub mod dispatch;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use folio_config::model::MailConfig;
use folio_core::{AdapterType, FolioError, HealthStatus, Notification, Notifier, PluginAdapter};

pub use compose::notification_for;
pub use dispatch::NotificationDispatcher;
pub use smtp::SmtpNotifier;

/// Notifier used when mail is switched off. Drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl PluginAdapter for DisabledNotifier {
    fn name(&self) -> &str {
        "disabled"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        Ok(HealthStatus::Degraded("mail disabled".into()))
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), FolioError> {
        tracing::debug!(subject = %notification.subject, "mail disabled, notification dropped");
        Ok(())
    }
}

/// Build the notifier selected by `[mail]`.
pub fn notifier_from_config(config: &MailConfig) -> Result<Arc<dyn Notifier>, FolioError> {
    if config.enabled {
        Ok(Arc::new(SmtpNotifier::from_config(config)?))
    } else {
        Ok(Arc::new(DisabledNotifier))
    }
}
