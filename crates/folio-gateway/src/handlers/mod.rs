// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Per-collection handlers take the collection kind as a plain argument; the
//! router binds it when the routes are built.

pub mod health;
pub mod intake;
pub mod media;
pub mod stats;
pub mod submissions;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::response::ApiError;

/// A JSON body whose rejection is reported through the envelope.
pub type JsonBody<T> = Result<Json<T>, JsonRejection>;

pub(crate) fn json_body<T>(body: JsonBody<T>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        ApiError::bad_request("Invalid request body.")
    })
}

/// Capitalise the first letter of a label ("web design" -> "Web design").
pub(crate) fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
