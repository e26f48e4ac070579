// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public form intake and the admin operations over submissions.

use std::str::FromStr;
use std::sync::Arc;

use folio_config::model::IntakeConfig;
use folio_core::{DocumentStore, FolioError, Submission, SubmissionKind, SubmissionStatus};
use folio_mail::{NotificationDispatcher, notification_for};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::records::RecordSet;

/// Fields accepted from the public forms.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
}

/// How strictly submissions are checked before they are stored.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    /// Reject submissions missing name, email or message.
    pub require_fields: bool,
    /// Recorded on applications that omit a project type.
    pub default_project_type: String,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::from(&IntakeConfig::default())
    }
}

impl From<&IntakeConfig> for IntakePolicy {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            require_fields: config.require_fields,
            default_project_type: config.default_project_type.clone(),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SubmissionInput {
    /// Names of required fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Accepts form submissions and serves the admin views over them.
pub struct IntakeService {
    applications: RecordSet<Submission>,
    contacts: RecordSet<Submission>,
    dispatcher: NotificationDispatcher,
    policy: IntakePolicy,
}

impl IntakeService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        dispatcher: NotificationDispatcher,
        policy: IntakePolicy,
    ) -> Self {
        Self {
            applications: RecordSet::new(
                Arc::clone(&store),
                SubmissionKind::Application.collection(),
            ),
            contacts: RecordSet::new(store, SubmissionKind::Contact.collection()),
            dispatcher,
            policy,
        }
    }

    fn records(&self, kind: SubmissionKind) -> &RecordSet<Submission> {
        match kind {
            SubmissionKind::Application => &self.applications,
            SubmissionKind::Contact => &self.contacts,
        }
    }

    /// Validate and store a submission, then notify the operator in the background.
    ///
    /// The returned record is final as soon as the store write succeeds; the
    /// notification outcome never changes it.
    pub async fn submit(
        &self,
        kind: SubmissionKind,
        input: SubmissionInput,
    ) -> Result<Submission, FolioError> {
        if self.policy.require_fields {
            let missing = input.missing_fields();
            if !missing.is_empty() {
                return Err(FolioError::missing_fields(&missing));
            }
        }

        let text = |value: &Option<String>| Value::String(present(value).unwrap_or("").to_string());
        let mut fields = Map::new();
        fields.insert("type".into(), Value::String(kind.to_string()));
        fields.insert("name".into(), text(&input.name));
        fields.insert("email".into(), text(&input.email));
        fields.insert("message".into(), text(&input.message));
        if kind == SubmissionKind::Application {
            let project_type = present(&input.project_type)
                .unwrap_or(&self.policy.default_project_type)
                .to_string();
            fields.insert("projectType".into(), Value::String(project_type));
        }
        fields.insert(
            "status".into(),
            Value::String(kind.initial_status().to_string()),
        );

        let submission = self.records(kind).create(fields).await?;
        info!(kind = %kind, id = %submission.id, "submission stored");

        self.dispatcher.dispatch(notification_for(&submission));
        Ok(submission)
    }

    /// All submissions of a kind, newest first.
    pub async fn list(&self, kind: SubmissionKind) -> Result<Vec<Submission>, FolioError> {
        self.records(kind).list().await
    }

    /// Set the review status. The value must belong to the kind's status set.
    pub async fn update_status(
        &self,
        kind: SubmissionKind,
        id: &str,
        status: &str,
    ) -> Result<(), FolioError> {
        let allowed = || {
            kind.statuses()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let status = SubmissionStatus::from_str(status.trim())
            .ok()
            .filter(|s| kind.allows(*s))
            .ok_or_else(|| {
                FolioError::invalid_field(
                    "status",
                    format!("status must be one of: {}", allowed()),
                )
            })?;

        let mut fields = Map::new();
        fields.insert("status".into(), Value::String(status.to_string()));
        self.records(kind).patch(id, fields).await?;
        info!(kind = %kind, id, status = %status, "submission status updated");
        Ok(())
    }

    pub async fn delete(&self, kind: SubmissionKind, id: &str) -> Result<(), FolioError> {
        self.records(kind).remove(id).await?;
        info!(kind = %kind, id, "submission deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_treats_blank_as_missing() {
        let input = SubmissionInput {
            name: Some("  ".into()),
            email: Some("a@x.com".into()),
            message: None,
            project_type: None,
        };
        assert_eq!(input.missing_fields(), vec!["name", "message"]);
    }

    #[test]
    fn complete_input_has_no_missing_fields() {
        let input = SubmissionInput {
            name: Some("A".into()),
            email: Some("a@x.com".into()),
            message: Some("m".into()),
            project_type: None,
        };
        assert!(input.missing_fields().is_empty());
    }

    #[test]
    fn input_deserializes_project_type_camel_case() {
        let input: SubmissionInput =
            serde_json::from_str(r#"{"name":"A","projectType":"Web Design"}"#).unwrap();
        assert_eq!(input.project_type.as_deref(), Some("Web Design"));
        assert!(input.email.is_none());
    }

    #[test]
    fn policy_defaults_follow_config() {
        let policy = IntakePolicy::default();
        assert!(policy.require_fields);
        assert_eq!(policy.default_project_type, "General");
    }
}
