//! Game service: the shared game state plus the model slot.
//!
//! Every operation takes the game lock for its whole read-modify-write, so
//! concurrent requests never interleave inside one `ask`/`guess`/`reset`.

use std::sync::Arc;
use std::time::Instant;

use rose_common::{
    AskResponse, Game, GameError, GuessResponse, HealthResponse, ResetResponse, StatusResponse,
};
use tokio::sync::Mutex;
use tracing::info;

use crate::model_slot::ModelSlot;

#[derive(Clone)]
pub struct GameService {
    game: Arc<Mutex<Game>>,
    model: Arc<ModelSlot>,
    start_time: Instant,
}

impl GameService {
    pub fn new(model: Arc<ModelSlot>) -> Self {
        Self {
            game: Arc::new(Mutex::new(Game::new())),
            model,
            start_time: Instant::now(),
        }
    }

    pub fn model(&self) -> &Arc<ModelSlot> {
        &self.model
    }

    pub fn model_ready(&self) -> bool {
        self.model.is_ready()
    }

    /// Snapshot of the game. Available before the model is ready.
    pub async fn status(&self) -> StatusResponse {
        let game = self.game.lock().await;
        game.status(self.model.is_ready())
    }

    /// Ask a question. Classification runs on a blocking worker while the
    /// game lock is held.
    pub async fn ask(&self, question: String) -> Result<AskResponse, GameError> {
        let classifier = self.model.classifier()?;
        let mut game = Arc::clone(&self.game).lock_owned().await;

        let reply = tokio::task::spawn_blocking(move || game.ask(&question, classifier.as_ref()))
            .await
            .map_err(|e| GameError::Internal(format!("classification task failed: {}", e)))??;

        info!(
            "[GAME] ask -> {} ({}/{}{})",
            reply.label.as_str(),
            reply.question_count,
            reply.max_questions,
            if reply.game_over { ", game over" } else { "" }
        );
        Ok(reply)
    }

    /// Make a guess. Refused until the model is ready, like `ask`.
    pub async fn guess(&self, guess: String) -> Result<GuessResponse, GameError> {
        if !self.model.is_ready() {
            return Err(GameError::ModelNotReady);
        }
        let mut game = self.game.lock().await;
        let reply = game.guess(&guess);
        info!(
            "[GAME] guess -> {} ({} questions{})",
            if reply.correct { "correct" } else { "wrong" },
            reply.question_count,
            if reply.game_over { ", game over" } else { "" }
        );
        Ok(reply)
    }

    /// Back to a fresh game, whatever the current state.
    pub async fn reset(&self) -> ResetResponse {
        let mut game = self.game.lock().await;
        game.reset();
        info!("[GAME] reset");
        ResetResponse::ok()
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            model_phase: self.model.phase(),
            last_error: self.model.failure().map(str::to_string),
        }
    }
}
