// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface of the Folio portfolio backend.
//!
//! An axum router over the catalog services: public form intake and media
//! listings, plus bearer-protected admin endpoints under `/api/admin`.
//! Responses share one JSON envelope; failures never expose their cause.

pub mod auth;
pub mod handlers;
pub mod multipart;
pub mod response;
pub mod server;

pub use auth::AuthConfig;
pub use response::{ApiError, Envelope};
pub use server::{AppState, build_router, start_server};
