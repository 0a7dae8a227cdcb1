//! Write-once holder for the trained model.
//!
//! Readiness is "a snapshot has been published", so readers never see a
//! ready flag without the classifier behind it. Publishing happens at most
//! once per process; a startup failure is recorded instead and the slot
//! stays empty for good.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use rose_common::{GameError, ModelPhase, QuestionClassifier};

pub type SharedClassifier = Arc<dyn QuestionClassifier>;

#[derive(Default)]
pub struct ModelSlot {
    classifier: OnceCell<SharedClassifier>,
    failure: OnceCell<String>,
}

impl ModelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the trained classifier. Fails if the slot is already settled.
    pub fn publish(&self, classifier: SharedClassifier) -> Result<(), GameError> {
        if self.failure.get().is_some() {
            return Err(GameError::Internal(
                "model slot already marked as failed".to_string(),
            ));
        }
        self.classifier
            .set(classifier)
            .map_err(|_| GameError::Internal("model already published".to_string()))
    }

    /// Record a startup failure. Ignored once a model is published.
    pub fn fail(&self, message: impl Into<String>) {
        if self.classifier.get().is_none() {
            let _ = self.failure.set(message.into());
        }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.get().is_some()
    }

    pub fn classifier(&self) -> Result<SharedClassifier, GameError> {
        self.classifier.get().cloned().ok_or(GameError::ModelNotReady)
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.get().map(String::as_str)
    }

    pub fn phase(&self) -> ModelPhase {
        if self.is_ready() {
            ModelPhase::Ready
        } else if self.failure.get().is_some() {
            ModelPhase::Failed
        } else {
            ModelPhase::Training
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rose_common::Label;

    struct Always(Label);

    impl QuestionClassifier for Always {
        fn classify(&self, _q: &str) -> Result<Label, GameError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_starts_not_ready() {
        let slot = ModelSlot::new();
        assert!(!slot.is_ready());
        assert_eq!(slot.phase(), ModelPhase::Training);
        assert_eq!(slot.classifier().err(), Some(GameError::ModelNotReady));
    }

    #[test]
    fn test_publish_once() {
        let slot = ModelSlot::new();
        slot.publish(Arc::new(Always(Label::Yes))).unwrap();
        assert!(slot.is_ready());
        assert_eq!(slot.phase(), ModelPhase::Ready);
        assert_eq!(slot.classifier().unwrap().classify("x").unwrap(), Label::Yes);

        assert!(slot.publish(Arc::new(Always(Label::No))).is_err());
        assert_eq!(slot.classifier().unwrap().classify("x").unwrap(), Label::Yes);
    }

    #[test]
    fn test_failure_is_permanent() {
        let slot = ModelSlot::new();
        slot.fail("model.safetensors missing");
        assert_eq!(slot.phase(), ModelPhase::Failed);
        assert_eq!(slot.failure(), Some("model.safetensors missing"));
        assert!(slot.publish(Arc::new(Always(Label::Yes))).is_err());
        assert!(!slot.is_ready());
    }

    #[test]
    fn test_fail_after_publish_is_ignored() {
        let slot = ModelSlot::new();
        slot.publish(Arc::new(Always(Label::Close))).unwrap();
        slot.fail("late");
        assert_eq!(slot.phase(), ModelPhase::Ready);
        assert_eq!(slot.failure(), None);
    }
}
