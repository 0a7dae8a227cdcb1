//! Answer categories.
//!
//! The five categories the classifier predicts, each with a stable integer
//! id. Ids double as the classifier's output logit index, so their order is
//! part of the model contract.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Category Labels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "too far away")]
    TooFarAway,
    #[serde(rename = "no")]
    No,
    #[serde(rename = "i don't know")]
    DontKnow,
    #[serde(rename = "close")]
    Close,
    #[serde(rename = "yes")]
    Yes,
}

impl Label {
    /// All labels, ordered by id.
    pub const ALL: [Label; 5] = [
        Label::TooFarAway,
        Label::No,
        Label::DontKnow,
        Label::Close,
        Label::Yes,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn id(self) -> u32 {
        match self {
            Self::TooFarAway => 0,
            Self::No => 1,
            Self::DontKnow => 2,
            Self::Close => 3,
            Self::Yes => 4,
        }
    }

    pub fn from_id(id: u32) -> Option<Label> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TooFarAway => "too far away",
            Self::No => "no",
            Self::DontKnow => "i don't know",
            Self::Close => "close",
            Self::Yes => "yes",
        }
    }

    pub fn from_name(name: &str) -> Option<Label> {
        Self::ALL.iter().copied().find(|l| l.as_str() == name)
    }

    /// Pick the label with the highest logit.
    ///
    /// Ties resolve to the lowest id. Returns `None` when `logits` does not
    /// hold exactly one value per label.
    pub fn argmax(logits: &[f32]) -> Option<Label> {
        if logits.len() != Self::COUNT {
            return None;
        }
        let mut best = 0usize;
        for (i, v) in logits.iter().enumerate().skip(1) {
            if *v > logits[best] {
                best = i;
            }
        }
        Self::from_id(best as u32)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Ask Outcome Labels
// ============================================================================

/// Terminal outcomes reported in place of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    #[serde(rename = "guessed")]
    Guessed,
    #[serde(rename = "game_over")]
    GameOver,
}

/// The `label` field of an ask reply: a category or a terminal outcome.
///
/// Serialises to a bare string (`"yes"`, `"guessed"`, `"game_over"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AskLabel {
    Category(Label),
    Outcome(Terminal),
}

impl AskLabel {
    pub fn category(self) -> Option<Label> {
        match self {
            Self::Category(label) => Some(label),
            Self::Outcome(_) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category(label) => label.as_str(),
            Self::Outcome(Terminal::Guessed) => "guessed",
            Self::Outcome(Terminal::GameOver) => "game_over",
        }
    }
}

impl From<Label> for AskLabel {
    fn from(label: Label) -> Self {
        Self::Category(label)
    }
}
