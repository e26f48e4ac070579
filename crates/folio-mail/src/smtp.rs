// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP relay notifier built on lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use folio_config::model::MailConfig;
use folio_core::{AdapterType, FolioError, HealthStatus, Notification, Notifier, PluginAdapter};

/// STARTTLS submission port; any other port uses implicit TLS.
const STARTTLS_PORT: u16 = 587;

/// Sends notifications to the operator through an authenticated SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

fn mailbox(key: &str, value: &str) -> Result<Mailbox, FolioError> {
    value.parse().map_err(|e| {
        FolioError::Config(format!("mail.{key} `{value}` is not a valid address: {e}"))
    })
}

fn notification_error(
    message: String,
    err: impl std::error::Error + Send + Sync + 'static,
) -> FolioError {
    FolioError::Notification {
        message,
        source: Some(Box::new(err)),
    }
}

impl SmtpNotifier {
    /// Build the relay transport. No connection is made until the first send.
    pub fn from_config(config: &MailConfig) -> Result<Self, FolioError> {
        let (Some(username), Some(password), Some(operator)) = (
            config.smtp_username.as_deref(),
            config.smtp_password.as_deref(),
            config.operator_address.as_deref(),
        ) else {
            return Err(FolioError::Config(
                "mail requires smtp_username, smtp_password and operator_address".into(),
            ));
        };

        let from = mailbox("from_address", config.from_address.as_deref().unwrap_or(username))?;
        let to = mailbox("operator_address", operator)?;

        let builder = match config.smtp_port {
            Some(STARTTLS_PORT) => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            }
            _ => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host),
        }
        .map_err(|e| {
            FolioError::Config(format!("invalid SMTP relay `{}`: {e}", config.smtp_host))
        })?;
        let builder = match config.smtp_port {
            Some(port) => builder.port(port),
            None => builder,
        };
        let transport = builder
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self { transport, from, to })
    }

    /// Render a notification as a plain-text message.
    pub fn build_message(&self, notification: &Notification) -> Result<Message, FolioError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN);
        if let Some(reply_to) = &notification.reply_to {
            // A malformed submitter address only loses the Reply-To header.
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(e) => debug!(reply_to = %reply_to, error = %e, "skipping invalid Reply-To"),
            }
        }
        builder
            .body(notification.body.clone())
            .map_err(|e| notification_error(format!("failed to build message: {e}"), e))
    }
}

#[async_trait]
impl PluginAdapter for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Notifier
    }

    async fn health_check(&self) -> Result<HealthStatus, FolioError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Unhealthy("SMTP relay refused connection".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("SMTP relay unreachable: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), FolioError> {
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), FolioError> {
        let message = self.build_message(notification)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| notification_error(format!("SMTP send failed: {e}"), e))?;
        debug!(subject = %notification.subject, to = %self.to, "notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            enabled: true,
            smtp_username: Some("bot@example.com".into()),
            smtp_password: Some("app-password".into()),
            operator_address: Some("owner@example.com".into()),
            ..Default::default()
        }
    }

    fn notification(reply_to: Option<&str>) -> Notification {
        Notification {
            subject: "New Contact Message from Ana".into(),
            body: "Name: Ana\n".into(),
            reply_to: reply_to.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn message_carries_sender_recipient_and_reply_to() {
        let notifier = SmtpNotifier::from_config(&config()).unwrap();
        let message = notifier
            .build_message(&notification(Some("ana@example.com")))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: bot@example.com"));
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("Reply-To: ana@example.com"));
        assert!(raw.contains("Subject: New Contact Message from Ana"));
    }

    #[tokio::test]
    async fn invalid_reply_to_is_dropped_not_fatal() {
        let notifier = SmtpNotifier::from_config(&config()).unwrap();
        let message = notifier.build_message(&notification(Some("not an address"))).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }

    #[tokio::test]
    async fn explicit_from_address_wins() {
        let mut config = config();
        config.from_address = Some("Folio <noreply@example.com>".into());
        config.smtp_port = Some(587);
        let notifier = SmtpNotifier::from_config(&config).unwrap();
        let message = notifier.build_message(&notification(None)).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("noreply@example.com"));
    }

    #[test]
    fn invalid_operator_address_is_config_error() {
        let mut config = config();
        config.operator_address = Some("nope".into());
        assert!(matches!(
            SmtpNotifier::from_config(&config),
            Err(FolioError::Config(_))
        ));
    }
}
