//! Concept taxonomy for the hidden answer.
//!
//! Hand-authored phrases describing what the rose is, what it is close to,
//! what it is not, and what is nowhere near it. The corpus synthesizer
//! substitutes each phrase into every sentence template.

use crate::labels::Label;

/// Concept phrases per category, in category id order.
pub const CONCEPTS: &[(Label, &[&str])] = &[
    (
        Label::TooFarAway,
        &[
            "a planet",
            "a galaxy",
            "a weapon",
            "a building",
            "a country",
            "a city",
            "furniture",
            "clothing",
            "a musical instrument",
        ],
    ),
    (
        Label::No,
        &[
            "an animal", "a mammal", "a bird", "a fish", "an insect",
            "a human", "a person", "a machine", "a robot", "a vehicle",
            "electronics", "software", "a tree", "a fruit",
            "a vegetable", "meat", "a herb",
            "jasmine", "lily", "lotus", "tulip", "sunflower", "orchid",
            "daisy", "marigold", "hibiscus", "lavender", "chrysanthemum",
            "carnation", "daffodil", "peony", "iris", "poppy", "magnolia",
            "geranium", "begonia", "petunia", "azalea", "camellia",
            "gardenia", "freesia", "anemone", "bluebell", "buttercup",
            "dahlia", "gladiolus", "hydrangea", "lilac", "pansy",
            "primrose", "snapdragon", "tuberose", "violet", "zinnia",
            "walk", "speak", "run",
        ],
    ),
    (
        Label::DontKnow,
        &["expensive", "rare", "popular", "lucky", "special"],
    ),
    (
        Label::Close,
        &[
            "red",
            "pink",
            "white",
            "yellow",
            "fragrant",
            "beautiful",
            "used in romance",
            "symbolic",
            "having thorns",
            "used in weddings",
            "used on valentine's day",
        ],
    ),
    (
        Label::Yes,
        &[
            "a living thing",
            "alive",
            "a plant",
            "a flowering plant",
            "a flower",
            "a non animal living thing",
            "a biological organism",
            "a natural organism",
            "a photosynthetic organism",
            "something that grows",
            "alive but not an animal",
            "a stationary living thing",
            "an angiosperm",
            "a garden plant",
            "an ornamental plant",
            "having petals",
            "having a stem",
            "having leaves",
        ],
    ),
];

/// Question templates; `{}` marks where the concept phrase goes.
pub const TEMPLATES: &[&str] = &[
    "Is it {}?",
    "Is this a {}?",
    "Would you classify it as {}?",
    "Can it be described as {}?",
    "Does it belong to {}?",
];

/// Literal questions naming the answer, labelled yes.
pub const IDENTITY_YES: &[&str] = &[
    "is it rose?",
    "is it a rose?",
    "is the answer rose?",
    "are you thinking of rose?",
];

/// Literal near-miss guesses, labelled no.
pub const IDENTITY_NO: &[&str] = &["is it tulip?", "is it lotus?", "is it dog?", "is it car?"];

/// Concept phrases for one category.
pub fn concepts_for(label: Label) -> &'static [&'static str] {
    CONCEPTS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, phrases)| *phrases)
        .unwrap_or(&[])
}

/// Substitute a concept phrase into a template.
pub fn fill(template: &str, phrase: &str) -> String {
    template.replacen("{}", phrase, 1)
}
