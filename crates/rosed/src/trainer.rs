//! Classifier training.
//!
//! One pass over the pipeline: embed every example, then run mini-batch
//! Adam over cross-entropy for the configured number of epochs. No early
//! stopping, no validation split; the full epoch count always runs.

use candle_core::{Device, Tensor};
use candle_nn::{AdamW, Optimizer, ParamsAdamW};
use rand::seq::SliceRandom;
use rand::Rng;
use rose_common::corpus::TrainingExample;
use rose_common::Label;
use tracing::{debug, info};

use crate::classifier::{ClassifierParams, RoseClassifier};
use crate::config::TrainingConfig;
use crate::embedder::{Embedder, ModelError};

/// Epochs between loss log lines.
const LOG_EVERY: usize = 5;

/// Summary of a finished training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub examples: usize,
    pub epochs: usize,
    /// Summed batch loss of the last epoch.
    pub final_loss: f32,
    /// Accuracy of the trained classifier on its own training set.
    pub train_accuracy: f32,
}

/// Embed the examples and train a classifier on them.
pub fn train<R: Rng + ?Sized>(
    examples: &[TrainingExample],
    embedder: &dyn Embedder,
    cfg: &TrainingConfig,
    rng: &mut R,
) -> Result<(RoseClassifier, TrainingReport), ModelError> {
    let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
    info!("[ML] Encoding {} texts...", texts.len());
    let features = embedder.embed_batch(&texts)?;
    let labels: Vec<Label> = examples.iter().map(|e| e.label).collect();
    fit(&features, &labels, cfg, rng)
}

/// Train on pre-computed features `[n, dim]` with one label per row.
pub fn fit<R: Rng + ?Sized>(
    features: &Tensor,
    labels: &[Label],
    cfg: &TrainingConfig,
    rng: &mut R,
) -> Result<(RoseClassifier, TrainingReport), ModelError> {
    let (n, input_dim) = features.dims2()?;
    if n == 0 || labels.is_empty() {
        return Err(ModelError::EmptyCorpus);
    }
    let device: &Device = features.device();
    let ids: Vec<u32> = labels.iter().map(|l| l.id()).collect();
    let targets = Tensor::from_vec(ids, labels.len(), device)?;

    let params = ClassifierParams::init(input_dim, cfg.hidden_dim, rng, device)?;
    let mut optimizer = AdamW::new(
        params.vars(),
        ParamsAdamW {
            lr: cfg.learning_rate,
            weight_decay: 0.0,
            ..Default::default()
        },
    )?;

    let batch_size = cfg.batch_size.max(1);
    let mut order: Vec<u32> = (0..n as u32).collect();
    let mut epoch_loss = 0f32;

    info!(
        "[ML] Training... ({} examples, {} epochs, batch {}, lr {})",
        n, cfg.epochs, batch_size, cfg.learning_rate
    );
    for epoch in 0..cfg.epochs {
        order.shuffle(rng);
        epoch_loss = 0.0;
        for batch in order.chunks(batch_size) {
            let idx = Tensor::from_slice(batch, batch.len(), device)?;
            let x = features.index_select(&idx, 0)?;
            let y = targets.index_select(&idx, 0)?;
            let logits = params.forward(&x)?;
            let loss = candle_nn::loss::cross_entropy(&logits, &y)?;
            optimizer.backward_step(&loss)?;
            epoch_loss += loss.to_scalar::<f32>()?;
        }
        if (epoch + 1) % LOG_EVERY == 0 {
            info!("[ML] Epoch {}/{} | Loss: {:.4}", epoch + 1, cfg.epochs, epoch_loss);
        } else {
            debug!("[ML] Epoch {}/{} | Loss: {:.4}", epoch + 1, cfg.epochs, epoch_loss);
        }
    }

    let classifier = params.freeze();
    let predicted = classifier.predict(features)?;
    let correct = predicted.iter().zip(labels).filter(|(p, l)| p == l).count();

    let report = TrainingReport {
        examples: n,
        epochs: cfg.epochs,
        final_loss: epoch_loss,
        train_accuracy: correct as f32 / n as f32,
    };
    Ok((classifier, report))
}
