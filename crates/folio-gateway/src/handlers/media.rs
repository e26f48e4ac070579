// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media endpoints, public and admin, for reels and web designs.

use axum::extract::{Multipart, Path, State};
use folio_catalog::{MediaListing, Scope};
use folio_core::{MediaItem, MediaKind, MediaPatch};

use crate::handlers::{JsonBody, capitalized, json_body};
use crate::multipart::read_upload;
use crate::response::{ApiError, Envelope, OrFail};
use crate::server::AppState;

fn plural(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Reel => "reels",
        MediaKind::WebDesign => "web designs",
    }
}

async fn list(
    state: &AppState,
    kind: MediaKind,
    scope: Scope,
) -> Result<Envelope<MediaListing>, ApiError> {
    let listing = state
        .services
        .catalog
        .list(kind, scope)
        .await
        .or_fail(&format!("Failed to fetch {}.", plural(kind)))?;
    Ok(Envelope::data(listing))
}

/// GET /api/{reels|webdesigns}: active items, public fields only.
pub async fn list_public(
    State(state): State<AppState>,
    kind: MediaKind,
) -> Result<Envelope<MediaListing>, ApiError> {
    list(&state, kind, Scope::Public).await
}

/// GET /api/admin/{reels|webdesigns}: every item, every field.
pub async fn list_admin(
    State(state): State<AppState>,
    kind: MediaKind,
) -> Result<Envelope<MediaListing>, ApiError> {
    list(&state, kind, Scope::Admin).await
}

/// POST /api/admin/{reels|webdesigns}: multipart `file` plus metadata.
pub async fn upload(
    State(state): State<AppState>,
    kind: MediaKind,
    multipart: Multipart,
) -> Result<Envelope<MediaItem>, ApiError> {
    let (file, metadata) = read_upload(multipart).await?;
    let item = state
        .services
        .uploads
        .upload(kind, file, metadata)
        .await
        .or_fail(&format!("Failed to upload {}.", kind.label()))?;
    Ok(Envelope::with_message(
        format!("{} uploaded successfully!", capitalized(kind.label())),
        item,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    kind: MediaKind,
    Path(id): Path<String>,
    body: JsonBody<MediaPatch>,
) -> Result<Envelope<()>, ApiError> {
    let patch = json_body(body)?;
    state
        .services
        .catalog
        .update(kind, &id, patch)
        .await
        .or_fail(&format!("Failed to update {}.", kind.label()))?;
    Ok(Envelope::message(format!("{} updated.", capitalized(kind.label()))))
}

/// DELETE: the record always goes; the object is removed best-effort.
pub async fn delete(
    State(state): State<AppState>,
    kind: MediaKind,
    Path(id): Path<String>,
) -> Result<Envelope<()>, ApiError> {
    state
        .services
        .catalog
        .delete(kind, &id)
        .await
        .or_fail(&format!("Failed to delete {}.", kind.label()))?;
    Ok(Envelope::message(format!("{} deleted.", capitalized(kind.label()))))
}
