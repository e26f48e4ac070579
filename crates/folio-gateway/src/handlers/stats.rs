// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use axum::extract::State;
use folio_core::Stats;

use crate::response::{ApiError, Envelope, OrFail};
use crate::server::AppState;

/// GET /api/admin/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Envelope<Stats>, ApiError> {
    let stats = state
        .services
        .stats
        .collect()
        .await
        .or_fail("Failed to fetch stats.")?;
    Ok(Envelope::data(stats))
}
