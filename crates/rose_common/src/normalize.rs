//! Question normalization.
//!
//! Collapses common paraphrases onto canonical questions the classifier was
//! trained on. Rules are checked in order, first match wins.

/// A rewrite rule: if any trigger occurs in the question, the whole question
/// becomes `canonical`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub triggers: &'static [&'static str],
    pub canonical: &'static str,
}

impl Rule {
    pub fn matches(&self, question: &str) -> bool {
        self.triggers.iter().any(|t| question.contains(t))
    }
}

/// Order is significant.
pub const RULES: &[Rule] = &[
    Rule {
        triggers: &["living thing"],
        canonical: "is it a living thing?",
    },
    Rule {
        triggers: &["can it die", "does it die"],
        canonical: "is it a living thing?",
    },
    Rule {
        triggers: &["can it grow", "does it grow"],
        canonical: "is it a plant?",
    },
    Rule {
        triggers: &["does it breathe", "does it eat"],
        canonical: "is it an animal?",
    },
];

/// Lower-case, trim, then apply the first matching rule.
pub fn normalize(question: &str) -> String {
    let q = question.trim().to_lowercase();
    match RULES.iter().find(|r| r.matches(&q)) {
        Some(rule) => rule.canonical.to_string(),
        None => q,
    }
}
