// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notifier that records deliveries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use folio_core::{AdapterType, FolioError, HealthStatus, Notification, Notifier, PluginAdapter};

/// Records notifications; can be made to fail or to stall.
pub struct MockNotifier {
    delivered: Mutex<Vec<Notification>>,
    attempts: std::sync::atomic::AtomicUsize,
    attempted: Arc<Notify>,
    fail: bool,
    delay: Option<Duration>,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotifier {
    /// A notifier that succeeds immediately.
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            attempts: Default::default(),
            attempted: Arc::new(Notify::new()),
            fail: false,
            delay: None,
        }
    }

    /// A notifier whose every delivery fails, like an unreachable relay.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Delay each delivery, to show callers do not wait on it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().await.clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Wait until at least `n` deliveries were attempted, up to `timeout`.
    pub async fn wait_for_attempts(&self, n: usize, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, async {
            loop {
                let notified = self.attempted.notified();
                if self.attempts() >= n {
                    return;
                }
                notified.await;
            }
        })
        .await
        .is_ok()
    }
}

#[async_trait]
impl PluginAdapter for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), FolioError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = if self.fail {
            Err(FolioError::Notification {
                message: "mock relay unreachable".into(),
                source: None,
            })
        } else {
            self.delivered.lock().await.push(notification.clone());
            Ok(())
        };
        self.attempts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.attempted.notify_waiters();
        result
    }
}
