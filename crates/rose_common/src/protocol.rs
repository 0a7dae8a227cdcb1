//! Request/response types shared by the daemon and the control client.

use serde::{Deserialize, Serialize};

use crate::labels::AskLabel;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    pub guess: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub model_ready: bool,
    pub question_count: u32,
    pub max_questions: u32,
    pub game_over: bool,
    pub guessed_correctly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub label: AskLabel,
    /// Human message for terminal outcomes; absent for plain categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub question_count: u32,
    pub max_questions: u32,
    pub game_over: bool,
    pub guessed_correctly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub correct: bool,
    pub message: String,
    pub question_count: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub status: String,
}

impl ResetResponse {
    pub fn ok() -> Self {
        Self {
            message: "Game reset successfully".to_string(),
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Where the one-shot training pipeline currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPhase {
    Training,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model_phase: ModelPhase,
    #[serde(default)]
    pub last_error: Option<String>,
}

/// Error body returned by the daemon for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
