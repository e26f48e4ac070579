// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multipart extraction for media uploads.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use folio_catalog::{MediaMetadata, UploadFile};

use crate::response::ApiError;

const FALLBACK_MIME: &str = "application/octet-stream";

fn read_error(e: MultipartError) -> ApiError {
    let status = e.status();
    tracing::debug!(error = %e.body_text(), %status, "multipart read failed");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(status, "File exceeds the upload limit.")
    } else {
        ApiError::bad_request("Malformed upload.")
    }
}

/// Read the `file` part and the `title`, `category` and `tech` text parts.
///
/// Unknown parts are drained and ignored. A missing file is not an error
/// here; the upload policy reports it.
pub async fn read_upload(
    mut multipart: Multipart,
) -> Result<(Option<UploadFile>, MediaMetadata), ApiError> {
    let mut file = None;
    let mut metadata = MediaMetadata::default();

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or("file").to_string();
                let mime_type = field.content_type().unwrap_or(FALLBACK_MIME).to_string();
                let bytes = field.bytes().await.map_err(read_error)?;
                file = Some(UploadFile {
                    bytes,
                    original_name,
                    mime_type,
                });
            }
            "title" | "category" | "tech" => {
                let value = field.text().await.map_err(read_error)?;
                let slot = match name.as_str() {
                    "title" => &mut metadata.title,
                    "category" => &mut metadata.category,
                    _ => &mut metadata.tech,
                };
                *slot = Some(value);
            }
            _ => {
                field.bytes().await.map_err(read_error)?;
            }
        }
    }
    Ok((file, metadata))
}
