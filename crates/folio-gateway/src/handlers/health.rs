// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use axum::{Json, extract::State};
use folio_core::PluginAdapter;
use serde::Serialize;

use crate::server::AppState;

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `connected` when the document store reports healthy.
    pub storage: &'static str,
}

/// GET /api/health
///
/// Always 200; the storage flag carries the backend state.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match state.store.health_check().await {
        Ok(status) => status.is_healthy(),
        Err(e) => {
            tracing::warn!(error = %e, "document store health check failed");
            false
        }
    };
    Json(HealthResponse {
        status: "ok",
        storage: if connected { "connected" } else { "disconnected" },
    })
}
