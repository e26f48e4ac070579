// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound notification adapter trait.

use async_trait::async_trait;

use crate::error::FolioError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Notification;

/// Delivers operator notifications (e.g. through a mail relay).
#[async_trait]
pub trait Notifier: PluginAdapter {
    async fn notify(&self, notification: &Notification) -> Result<(), FolioError>;
}
