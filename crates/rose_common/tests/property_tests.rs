//! Property tests for the game core.
//!
//! Randomised inputs come from a seeded `StdRng` so failures reproduce.
//!
//! ## Invariants Tested
//!
//! - normalize is idempotent
//! - the 21st ordinary question ends the game, unguessed
//! - direct guesses never spend a question
//! - reset always restores the initial state
//! - question_count never passes the budget by more than one

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rose_common::corpus;
use rose_common::normalize::normalize;
use rose_common::{
    AskLabel, Game, GameError, GameState, Label, Phase, QuestionClassifier, Terminal,
    MAX_QUESTIONS,
};

// ============================================================================
// TEST HELPERS
// ============================================================================

struct Always(Label);

impl QuestionClassifier for Always {
    fn classify(&self, _q: &str) -> Result<Label, GameError> {
        Ok(self.0)
    }
}

const WORDS: &[&str] = &[
    "is", "it", "a", "living", "thing", "can", "does", "die", "grow", "breathe", "eat",
    "rose", "red", "planet", "?", "!", "  ", "Is", "IT", "Living", "DIE", "tulip",
];

fn random_text(rng: &mut StdRng) -> String {
    let n = rng.gen_range(0..8);
    (0..n)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// NORMALIZE
// ============================================================================

#[test]
fn prop_normalize_idempotent() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2000 {
        let text = random_text(&mut rng);
        let once = normalize(&text);
        assert_eq!(normalize(&once), once, "input {:?}", text);
    }
}

#[test]
fn prop_normalize_idempotent_on_corpus() {
    for example in corpus::expand() {
        let once = normalize(&example.text);
        assert_eq!(normalize(&once), once);
    }
}

// ============================================================================
// GAME
// ============================================================================

#[test]
fn prop_twenty_first_question_ends_game() {
    let clf = Always(Label::No);
    let mut game = Game::new();
    for i in 1..=MAX_QUESTIONS {
        let reply = game.ask("is it an animal?", &clf).unwrap();
        assert_eq!(reply.question_count, i);
        assert!(!reply.game_over);
        assert_eq!(reply.label, AskLabel::Category(Label::No));
    }
    let reply = game.ask("is it an animal?", &clf).unwrap();
    assert_eq!(reply.label, AskLabel::Outcome(Terminal::GameOver));
    assert!(reply.game_over);
    assert!(!reply.guessed_correctly);
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn prop_direct_guess_on_fresh_game() {
    for q in ["is it a rose?", "Rose", "  IT'S A ROSE!  ", "its a rose", "the rose."] {
        let mut game = Game::new();
        let reply = game.ask(q, &Always(Label::No)).unwrap();
        assert_eq!(reply.label, AskLabel::Outcome(Terminal::Guessed), "{:?}", q);
        assert!(reply.game_over);
        assert!(reply.guessed_correctly);
        assert_eq!(reply.question_count, 0);
    }
}

#[test]
fn prop_guess_rose_and_tulip() {
    let mut game = Game::new();
    let reply = game.guess("tulip");
    assert!(!reply.correct);
    assert_eq!(reply.question_count, 1);

    let mut game = Game::new();
    let reply = game.guess("rose");
    assert!(reply.correct);
    assert!(reply.game_over);
    assert_eq!(reply.question_count, 0);
}

#[test]
fn prop_reset_restores_initial_state() {
    let mut rng = StdRng::seed_from_u64(42);
    let clf = Always(Label::DontKnow);
    for _ in 0..200 {
        let mut game = Game::new();
        for _ in 0..rng.gen_range(0..40) {
            let text = random_text(&mut rng);
            if rng.gen_bool(0.5) {
                game.ask(&text, &clf).unwrap();
            } else {
                game.guess(&text);
            }
            assert!(game.state().question_count <= MAX_QUESTIONS + 1);
        }
        game.reset();
        assert_eq!(game.state(), GameState::default());
        assert_eq!(game.phase(), Phase::Active);
    }
}

#[test]
fn prop_game_over_is_sticky() {
    let mut rng = StdRng::seed_from_u64(7);
    let clf = Always(Label::Yes);
    let mut game = Game::new();
    game.guess("rose");
    let frozen = game.state();
    for _ in 0..50 {
        let text = random_text(&mut rng);
        game.ask(&text, &clf).unwrap();
        game.guess(&text);
        assert_eq!(game.state(), frozen);
    }
}
