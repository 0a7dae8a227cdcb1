//! API routes for rosed

use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rose_common::{
    AskRequest, AskResponse, ErrorResponse, GameError, GuessRequest, GuessResponse,
    HealthResponse, ResetResponse, RootResponse, StatusResponse,
};
use std::sync::Arc;
use tracing::{error, warn};

type AppStateArc = Arc<AppState>;

/// Error half of every fallible handler: status code plus `{"detail": ...}`.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a core error onto the wire.
pub fn api_error(err: GameError) -> ApiError {
    let status = match err {
        GameError::ModelNotReady | GameError::StartupFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        GameError::Inference(_) | GameError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if err.is_retryable() {
        warn!("[HTTP] {}", err);
    } else {
        error!("[HTTP] {}", err);
    }
    (
        status,
        Json(ErrorResponse {
            detail: err.to_string(),
        }),
    )
}

/// Refuse classifier-backed calls with the startup error once training failed.
fn check_startup(state: &AppState) -> Result<(), ApiError> {
    match state.service.model().failure() {
        Some(msg) => Err(api_error(GameError::StartupFailure(msg.to_string()))),
        None => Ok(()),
    }
}

// ============================================================================
// Root
// ============================================================================

pub fn root_routes() -> Router<AppStateArc> {
    Router::new().route("/api/", get(root))
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Rose Day AI Game API".to_string(),
    })
}

// ============================================================================
// Game Routes
// ============================================================================

pub fn game_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/game/status", get(game_status))
        .route("/api/game/ask", post(ask_question))
        .route("/api/game/guess", post(make_guess))
        .route("/api/game/reset", post(reset_game))
}

async fn game_status(State(state): State<AppStateArc>) -> Json<StatusResponse> {
    Json(state.service.status().await)
}

async fn ask_question(
    State(state): State<AppStateArc>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    check_startup(&state)?;
    state
        .service
        .ask(req.question)
        .await
        .map(Json)
        .map_err(api_error)
}

async fn make_guess(
    State(state): State<AppStateArc>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<GuessResponse>, ApiError> {
    check_startup(&state)?;
    state
        .service
        .guess(req.guess)
        .await
        .map(Json)
        .map_err(api_error)
}

async fn reset_game(State(state): State<AppStateArc>) -> Json<ResetResponse> {
    Json(state.service.reset().await)
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(state.service.health())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_is_503() {
        let (status, Json(body)) = api_error(GameError::ModelNotReady);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.detail, "Model is still loading. Please wait...");
    }

    #[test]
    fn test_startup_failure_is_503() {
        let (status, Json(body)) = api_error(GameError::StartupFailure("no weights".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.detail.contains("no weights"));
    }

    #[test]
    fn test_inference_error_is_500() {
        let (status, _) = api_error(GameError::Inference("bad shape".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (status, _) = api_error(GameError::Internal("join".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
