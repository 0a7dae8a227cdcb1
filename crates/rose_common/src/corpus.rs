//! Training corpus synthesis.
//!
//! Expands the concept taxonomy across the sentence templates, appends the
//! literal identity questions, shuffles and truncates. The shuffle is only
//! as reproducible as the RNG passed in.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::labels::Label;
use crate::taxonomy::{fill, CONCEPTS, IDENTITY_NO, IDENTITY_YES, TEMPLATES};

/// Default number of examples kept after shuffling.
pub const DEFAULT_CORPUS_SIZE: usize = 2000;

/// A labelled question. Lives for one training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub text: String,
    pub label: Label,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Every (concept, template) combination plus the identity questions, unshuffled.
pub fn expand() -> Vec<TrainingExample> {
    let mut data = Vec::new();
    for (label, phrases) in CONCEPTS {
        for phrase in phrases.iter() {
            for template in TEMPLATES {
                data.push(TrainingExample::new(fill(template, phrase), *label));
            }
        }
    }
    data.extend(IDENTITY_YES.iter().map(|q| TrainingExample::new(*q, Label::Yes)));
    data.extend(IDENTITY_NO.iter().map(|q| TrainingExample::new(*q, Label::No)));
    data
}

/// Shuffled corpus of at most `max_size` examples.
///
/// If the expansion yields fewer than `max_size` examples, all of them are
/// returned.
pub fn generate<R: Rng + ?Sized>(max_size: usize, rng: &mut R) -> Vec<TrainingExample> {
    let mut data = expand();
    data.shuffle(rng);
    data.truncate(max_size);
    data
}

/// Number of examples per label, indexed by label id.
pub fn label_counts(examples: &[TrainingExample]) -> [usize; Label::COUNT] {
    let mut counts = [0usize; Label::COUNT];
    for ex in examples {
        counts[ex.label.id() as usize] += 1;
    }
    counts
}
