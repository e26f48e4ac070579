// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token middleware for the admin routes.
//!
//! When no token is configured every admin request is rejected (fail-closed).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use ring::constant_time::verify_slices_are_equal;

use crate::response::ApiError;

/// Admin authentication settings.
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Expected bearer token. `None` disables admin access entirely.
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl AuthConfig {
    fn accepts(&self, presented: Option<&str>) -> bool {
        match (&self.bearer_token, presented) {
            (Some(expected), Some(token)) => {
                verify_slices_are_equal(expected.as_bytes(), token.as_bytes()).is_ok()
            }
            _ => false,
        }
    }
}

fn bearer(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

pub async fn admin_auth(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Response {
    if auth.bearer_token.is_none() {
        tracing::error!(
            path = %request.uri().path(),
            "no admin token configured -- rejecting request"
        );
        return ApiError::unauthorized().into_response();
    }
    if auth.accepts(bearer(&request)) {
        return next.run(request).await;
    }
    tracing::debug!(path = %request.uri().path(), "admin request rejected: bad or missing token");
    ApiError::unauthorized().into_response()
}
