// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Website HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the site.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use eerbeek_config::model::ServerConfig;
use eerbeek_core::{ChatAdapter, EerbeekError, StorageAdapter};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::pages::{self, PageRenderer};

/// Process-level facts reported by `/health`.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct WebState {
    /// Contact submission store.
    pub storage: Arc<dyn StorageAdapter>,
    /// Chat relay; `None` when chat is disabled or has no API key.
    pub chat: Option<Arc<dyn ChatAdapter>>,
    /// Page renderer with the embedded templates.
    pub pages: Arc<PageRenderer>,
    pub health: HealthState,
}

impl WebState {
    pub fn new(
        storage: Arc<dyn StorageAdapter>,
        chat: Option<Arc<dyn ChatAdapter>>,
        pages: Arc<PageRenderer>,
    ) -> Self {
        Self {
            storage,
            chat,
            pages,
            health: HealthState {
                start_time: Instant::now(),
            },
        }
    }
}

/// Build the site router.
///
/// Routes:
/// - GET `/`, `/diensten`, `/over-ons`, `/contact`, `/privacybeleid`
/// - POST `/contact` and `/chat`
/// - GET `/health`
/// - `/static/*` from `config.static_dir`
/// - everything else renders the 404 page
pub fn router(state: WebState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/diensten", get(pages::diensten))
        .route("/over-ons", get(pages::over_ons))
        .route(
            "/contact",
            get(pages::contact).post(handlers::post_contact),
        )
        .route("/privacybeleid", get(pages::privacybeleid))
        .route("/chat", post(handlers::post_chat))
        .route("/health", get(handlers::get_health))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback(pages::not_found)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `host:port` and serve until `shutdown` resolves.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: WebState,
    shutdown: F,
) -> Result<(), EerbeekError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| EerbeekError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("web server listening on {addr}");
    serve(listener, router(state, config), shutdown).await
}

/// Serve `app` on an already bound listener with graceful shutdown.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), EerbeekError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| EerbeekError::Internal(format!("web server error: {e}")))?;

    tracing::info!("web server stopped");
    Ok(())
}
