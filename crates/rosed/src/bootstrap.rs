//! One-shot startup training.
//!
//! Runs corpus synthesis, model load and classifier training on a blocking
//! worker while the HTTP server is already accepting requests. The result
//! is published into the model slot exactly once; on failure the slot is
//! marked failed and the daemon keeps serving status without a model.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rose_common::corpus::{self, TrainingExample};
use rose_common::GameError;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::{Config, TrainingConfig};
use crate::embedder::{Embedder, MiniLmEmbedder, ModelError};
use crate::engine::InferenceEngine;
use crate::model_slot::ModelSlot;
use crate::trainer;

/// Launch the production pipeline in the background.
pub fn spawn_training(config: Config, slot: Arc<ModelSlot>) -> JoinHandle<()> {
    spawn_pipeline(slot, move || run_pipeline(&config))
}

/// Run `pipeline` on a blocking worker and publish its outcome into `slot`.
pub fn spawn_pipeline<F>(slot: Arc<ModelSlot>, pipeline: F) -> JoinHandle<()>
where
    F: FnOnce() -> Result<InferenceEngine, ModelError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let start = Instant::now();
        match pipeline() {
            Ok(engine) => {
                let report = engine.report().clone();
                match slot.publish(Arc::new(engine)) {
                    Ok(()) => info!(
                        "[ML] Training complete in {:.1}s ({} examples, train accuracy {:.1}%). Model ready!",
                        start.elapsed().as_secs_f64(),
                        report.examples,
                        report.train_accuracy * 100.0
                    ),
                    Err(e) => error!("[ML] Could not publish model: {}", e),
                }
            }
            Err(e) => {
                let failure = GameError::StartupFailure(e.to_string());
                error!("[FATAL] {}", failure);
                error!("[FATAL] The game will report model_ready=false until restart");
                slot.fail(e.to_string());
            }
        }
    })
}

/// Generate the corpus, load the sentence encoder, train.
pub fn run_pipeline(config: &Config) -> Result<InferenceEngine, ModelError> {
    let mut rng = training_rng(config.training.seed);
    let dataset = generate_dataset(&config.training, &mut rng);

    info!("[ML] Loading sentence transformer from {}...", config.model.model_dir.display());
    let embedder: Arc<dyn Embedder> = Arc::new(MiniLmEmbedder::load(&config.model)?);

    train_engine(&dataset, embedder, &config.training, &mut rng)
}

/// Train an engine on top of an already loaded embedder.
pub fn build_engine(embedder: Arc<dyn Embedder>, cfg: &TrainingConfig) -> Result<InferenceEngine, ModelError> {
    let mut rng = training_rng(cfg.seed);
    let dataset = generate_dataset(cfg, &mut rng);
    train_engine(&dataset, embedder, cfg, &mut rng)
}

fn generate_dataset(cfg: &TrainingConfig, rng: &mut StdRng) -> Vec<TrainingExample> {
    info!("[ML] Generating dataset...");
    let dataset = corpus::generate(cfg.corpus_size, rng);
    info!("[ML] Samples: {}", dataset.len());
    dataset
}

fn train_engine(
    dataset: &[TrainingExample],
    embedder: Arc<dyn Embedder>,
    cfg: &TrainingConfig,
    rng: &mut StdRng,
) -> Result<InferenceEngine, ModelError> {
    let (classifier, report) = trainer::train(dataset, embedder.as_ref(), cfg, rng)?;
    Ok(InferenceEngine::new(embedder, classifier, report))
}

fn training_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("[ML] Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
