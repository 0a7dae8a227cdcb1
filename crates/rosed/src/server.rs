//! HTTP server for rosed

use crate::config::{CorsOrigins, ServerConfig};
use crate::routes;
use crate::service::GameService;
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
pub struct AppState {
    pub service: GameService,
}

impl AppState {
    pub fn new(service: GameService) -> Self {
        Self { service }
    }
}

/// Assemble the full router with CORS and request tracing.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::root_routes())
        .merge(routes::game_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let configured = match server.origins() {
        CorsOrigins::Any => {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }
        CorsOrigins::List(list) => list,
    };

    let origins: Vec<HeaderValue> = configured
        .into_iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("[HTTP] Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    if origins.is_empty() {
        warn!("[HTTP] No usable CORS origins configured; cross-origin requests will be refused");
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Run the HTTP server until Ctrl-C.
pub async fn run(server: ServerConfig, service: GameService) -> Result<()> {
    let app = build_router(AppState::new(service), &server);

    let listener = tokio::net::TcpListener::bind(&server.bind)
        .await
        .with_context(|| format!("binding {}", server.bind))?;
    info!("[HTTP] Listening on http://{}", server.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("[HTTP] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("[HTTP] Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("[HTTP] Shutdown requested");
}
