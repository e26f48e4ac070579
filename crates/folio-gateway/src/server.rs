// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use folio_catalog::{Services, SubmissionInput};
use folio_config::model::ServerConfig;
use folio_config::FolioConfig;
use folio_core::{DocumentStore, FolioError, MediaKind, MediaPatch, SubmissionKind};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, admin_auth};
use crate::handlers::submissions::StatusUpdate;
use crate::handlers::{JsonBody, health, intake, media, stats, submissions};

/// Headroom for multipart framing and text parts on top of the file ceiling.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Probed by the health endpoint.
    pub store: Arc<dyn DocumentStore>,
    pub auth: AuthConfig,
    /// Request body ceiling for upload routes.
    pub body_limit: usize,
}

impl AppState {
    pub fn new(services: Services, store: Arc<dyn DocumentStore>, config: &FolioConfig) -> Self {
        let body_limit = config
            .uploads
            .max_bytes
            .saturating_add(MULTIPART_OVERHEAD)
            .try_into()
            .unwrap_or(usize::MAX);
        Self {
            services,
            store,
            auth: AuthConfig {
                bearer_token: config.admin.bearer_token.clone(),
            },
            body_limit,
        }
    }
}

fn submission_routes(kind: SubmissionKind) -> Router<AppState> {
    let path = format!("/api/admin/{}", kind.collection());
    Router::new()
        .route(
            &path,
            get(move |state: State<AppState>| submissions::list(state, kind)),
        )
        .route(
            &format!("{path}/{{id}}"),
            patch(
                move |state: State<AppState>, id: Path<String>, body: JsonBody<StatusUpdate>| {
                    submissions::update_status(state, kind, id, body)
                },
            )
            .delete(move |state: State<AppState>, id: Path<String>| {
                submissions::delete(state, kind, id)
            }),
        )
}

fn media_admin_routes(kind: MediaKind, body_limit: usize) -> Router<AppState> {
    let path = format!("/api/admin/{}", kind.collection());
    Router::new()
        .route(
            &path,
            get(move |state: State<AppState>| media::list_admin(state, kind))
                .post(move |state: State<AppState>, multipart: Multipart| {
                    media::upload(state, kind, multipart)
                })
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            &format!("{path}/{{id}}"),
            patch(
                move |state: State<AppState>, id: Path<String>, body: JsonBody<MediaPatch>| {
                    media::update(state, kind, id, body)
                },
            )
            .delete(move |state: State<AppState>, id: Path<String>| {
                media::delete(state, kind, id)
            }),
        )
}

/// Build the full application router.
///
/// Public routes: health, the two forms and the active-media listings.
/// Everything under `/api/admin` sits behind the bearer-token middleware.
pub fn build_router(state: AppState) -> Router {
    let mut public_routes = Router::new()
        .route("/api/health", get(health::get_health))
        .route(
            "/api/apply",
            post(
                |state: State<AppState>, body: JsonBody<SubmissionInput>| {
                    intake::submit(state, SubmissionKind::Application, body)
                },
            ),
        )
        .route(
            "/api/contact",
            post(
                |state: State<AppState>, body: JsonBody<SubmissionInput>| {
                    intake::submit(state, SubmissionKind::Contact, body)
                },
            ),
        );
    for kind in MediaKind::ALL {
        public_routes = public_routes.route(
            &format!("/api/{}", kind.collection()),
            get(move |state: State<AppState>| media::list_public(state, kind)),
        );
    }

    let mut admin_routes = Router::new().route("/api/admin/stats", get(stats::get_stats));
    for kind in SubmissionKind::ALL {
        admin_routes = admin_routes.merge(submission_routes(kind));
    }
    for kind in MediaKind::ALL {
        admin_routes = admin_routes.merge(media_admin_routes(kind, state.body_limit));
    }
    let admin_routes = admin_routes.route_layer(axum_middleware::from_fn_with_state(
        state.auth.clone(),
        admin_auth,
    ));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), FolioError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FolioError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("Folio API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| FolioError::Internal(format!("server error: {e}")))?;

    tracing::info!("server stopped");
    Ok(())
}
