// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public form endpoints: POST /api/apply and POST /api/contact.

use axum::extract::State;
use folio_catalog::SubmissionInput;
use folio_core::{Submission, SubmissionKind};

use crate::handlers::{JsonBody, json_body};
use crate::response::{ApiError, Envelope, OrFail};
use crate::server::AppState;

fn outcome(kind: SubmissionKind) -> (&'static str, &'static str) {
    match kind {
        SubmissionKind::Application => (
            "Application submitted successfully!",
            "Failed to send application.",
        ),
        SubmissionKind::Contact => ("Message sent successfully!", "Failed to send message."),
    }
}

/// Store the submission and answer; the operator e-mail goes out afterwards.
pub async fn submit(
    State(state): State<AppState>,
    kind: SubmissionKind,
    body: JsonBody<SubmissionInput>,
) -> Result<Envelope<Submission>, ApiError> {
    let (success, failure) = outcome(kind);
    let input = json_body(body)?;
    let submission = state.services.intake.submit(kind, input).await.or_fail(failure)?;
    Ok(Envelope::with_message(success, submission))
}
