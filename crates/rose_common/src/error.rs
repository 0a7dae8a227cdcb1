//! Error types for the rose game.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Model is still loading. Please wait...")]
    ModelNotReady,

    #[error("Startup failed: {0}")]
    StartupFailure(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// Whether the caller should simply try again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::ModelNotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_not_ready_is_retryable() {
        assert!(GameError::ModelNotReady.is_retryable());
        assert!(!GameError::StartupFailure("no model".into()).is_retryable());
        assert!(!GameError::Inference("bad tensor".into()).is_retryable());
        assert!(!GameError::Internal("panic".into()).is_retryable());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            GameError::ModelNotReady.to_string(),
            "Model is still loading. Please wait..."
        );
        assert_eq!(
            GameError::StartupFailure("missing tokenizer.json".into()).to_string(),
            "Startup failed: missing tokenizer.json"
        );
    }
}
