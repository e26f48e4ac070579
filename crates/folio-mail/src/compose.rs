// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification text for new submissions.

use std::fmt::Write;

use folio_core::{Notification, Submission, SubmissionKind};

/// Summarize a stored submission for the operator.
///
/// Replies go to the submitter, so the operator can answer straight from
/// their mail client.
pub fn notification_for(submission: &Submission) -> Notification {
    let subject = match submission.kind {
        SubmissionKind::Application => format!("New Work Request from {}", submission.name),
        SubmissionKind::Contact => format!("New Contact Message from {}", submission.name),
    };

    let mut body = String::new();
    let _ = writeln!(body, "Name: {}", submission.name);
    let _ = writeln!(body, "Email: {}", submission.email);
    if submission.kind == SubmissionKind::Application {
        let project = submission.project_type.as_deref().unwrap_or("-");
        let _ = writeln!(body, "Project Type: {project}");
    }
    let _ = writeln!(body, "\nMessage:\n{}", submission.message);

    Notification {
        subject,
        body,
        reply_to: (!submission.email.trim().is_empty()).then(|| submission.email.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use folio_core::SubmissionStatus;

    fn submission(kind: SubmissionKind) -> Submission {
        Submission {
            id: "s1".into(),
            kind,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            message: "Let's talk.".into(),
            project_type: (kind == SubmissionKind::Application).then(|| "Web Design".into()),
            status: kind.initial_status(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn application_notification() {
        let n = notification_for(&submission(SubmissionKind::Application));
        assert_eq!(n.subject, "New Work Request from Ana");
        assert!(n.body.contains("Project Type: Web Design"));
        assert!(n.body.contains("Let's talk."));
        assert_eq!(n.reply_to.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn contact_notification_has_no_project_line() {
        let n = notification_for(&submission(SubmissionKind::Contact));
        assert_eq!(n.subject, "New Contact Message from Ana");
        assert!(!n.body.contains("Project Type"));
    }

    #[test]
    fn empty_email_sets_no_reply_to() {
        let mut s = submission(SubmissionKind::Contact);
        s.email = String::new();
        s.status = SubmissionStatus::Unread;
        assert!(notification_for(&s).reply_to.is_none());
    }
}
