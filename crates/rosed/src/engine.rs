//! Inference engine: question text to answer category.

use std::sync::Arc;

use rose_common::normalize::normalize;
use rose_common::{GameError, Label, QuestionClassifier};
use tracing::debug;

use crate::classifier::RoseClassifier;
use crate::embedder::{Embedder, ModelError};
use crate::trainer::TrainingReport;

/// Immutable snapshot published once training completes.
pub struct InferenceEngine {
    embedder: Arc<dyn Embedder>,
    classifier: RoseClassifier,
    report: TrainingReport,
}

impl InferenceEngine {
    pub fn new(embedder: Arc<dyn Embedder>, classifier: RoseClassifier, report: TrainingReport) -> Self {
        Self {
            embedder,
            classifier,
            report,
        }
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// Normalize, embed, take the top logit.
    pub fn predict(&self, question: &str) -> Result<Label, ModelError> {
        let normalized = normalize(question);
        let embedding = self.embedder.embed(&normalized)?;
        let logits = self
            .classifier
            .logits(&embedding)?
            .squeeze(0)?
            .to_vec1::<f32>()?;
        let label = Label::argmax(&logits).unwrap_or(Label::TooFarAway);
        debug!("[ML] {:?} -> {:?} -> {}", question, normalized, label);
        Ok(label)
    }
}

impl QuestionClassifier for InferenceEngine {
    fn classify(&self, question: &str) -> Result<Label, GameError> {
        self.predict(question)
            .map_err(|e| GameError::Inference(e.to_string()))
    }
}
