// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response envelope and error mapping.
//!
//! Every response body is `{ "success", "message"?, "data"? }`. Errors carry
//! only a generic "Failed to ..." message; the underlying cause is logged.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::FolioError;
use serde::Serialize;

/// The JSON envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// A failed request: status code plus the message shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized.")
    }

    /// Map a service error for the request described by `failure`
    /// (e.g. "Failed to fetch reels.").
    ///
    /// Validation messages name caller-supplied fields and are passed through;
    /// every other cause is logged and replaced by `failure`.
    pub fn from_folio(failure: &str, err: FolioError) -> Self {
        match err {
            FolioError::Validation { message, fields } => {
                tracing::debug!(fields = ?fields, %message, "request rejected");
                Self::bad_request(message)
            }
            FolioError::NotFound { collection, id } => {
                tracing::debug!(%collection, %id, "record not found");
                Self::new(StatusCode::NOT_FOUND, "Record not found.")
            }
            other => {
                tracing::error!(error = %other, "{failure}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::<()> {
            success: false,
            message: Some(self.message),
            data: None,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Attach the caller-facing failure message to a service result.
pub trait OrFail<T> {
    fn or_fail(self, failure: &str) -> Result<T, ApiError>;
}

impl<T> OrFail<T> for Result<T, FolioError> {
    fn or_fail(self, failure: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_folio(failure, e))
    }
}
