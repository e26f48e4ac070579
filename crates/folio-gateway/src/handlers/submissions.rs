// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin endpoints over applications and contacts.

use axum::extract::{Path, State};
use folio_core::{Submission, SubmissionKind};
use serde::Deserialize;

use crate::handlers::{JsonBody, capitalized, json_body};
use crate::response::{ApiError, Envelope, OrFail};
use crate::server::AppState;

/// Request body for PATCH /api/admin/{applications|contacts}/{id}.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
}

fn noun(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Application => "applications",
        SubmissionKind::Contact => "contacts",
    }
}

pub async fn list(
    State(state): State<AppState>,
    kind: SubmissionKind,
) -> Result<Envelope<Vec<Submission>>, ApiError> {
    let submissions = state
        .services
        .intake
        .list(kind)
        .await
        .or_fail(&format!("Failed to fetch {}.", noun(kind)))?;
    Ok(Envelope::data(submissions))
}

pub async fn update_status(
    State(state): State<AppState>,
    kind: SubmissionKind,
    Path(id): Path<String>,
    body: JsonBody<StatusUpdate>,
) -> Result<Envelope<()>, ApiError> {
    let update = json_body(body)?;
    let status = update.status.unwrap_or_default();
    state
        .services
        .intake
        .update_status(kind, &id, &status)
        .await
        .or_fail(&format!("Failed to update {kind}."))?;
    Ok(Envelope::message(format!("{} updated.", capitalized(&kind.to_string()))))
}

pub async fn delete(
    State(state): State<AppState>,
    kind: SubmissionKind,
    Path(id): Path<String>,
) -> Result<Envelope<()>, ApiError> {
    state
        .services
        .intake
        .delete(kind, &id)
        .await
        .or_fail(&format!("Failed to delete {kind}."))?;
    Ok(Envelope::message(format!("{} deleted.", capitalized(&kind.to_string()))))
}
