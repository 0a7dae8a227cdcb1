//! Game state machine.
//!
//! Two phases: `Active` until the answer is named or the question budget
//! runs out, then `GameOver` until reset. The machine itself is not
//! synchronised; callers wrap it in a lock so each operation is one
//! critical section.

use crate::error::GameError;
use crate::labels::{AskLabel, Label, Terminal};
use crate::protocol::{AskResponse, GuessResponse, StatusResponse};
use crate::MAX_QUESTIONS;

/// Inputs to `ask` that name the answer outright.
pub const ASK_DIRECT_GUESSES: &[&str] = &[
    "rose",
    "a rose",
    "the rose",
    "is it rose",
    "is it a rose",
    "its a rose",
    "it's a rose",
];

/// Inputs to `guess` accepted as correct. Narrower than the ask list.
pub const GUESS_DIRECT_ANSWERS: &[&str] = &["rose", "a rose", "the rose"];

const MSG_ALREADY_OVER: &str = "Game is already over!";
const MSG_ASK_GUESSED: &str = "YES! You guessed it! The answer is ROSE!";
const MSG_GUESS_CORRECT: &str = "YES! You guessed it correctly. The answer is ROSE!";

/// Maps a question to a category. Implemented by the inference engine.
pub trait QuestionClassifier: Send + Sync {
    fn classify(&self, question: &str) -> Result<Label, GameError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameState {
    pub question_count: u32,
    pub game_over: bool,
    pub guessed_correctly: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    GameOver,
}

/// Trim, lower-case and drop trailing punctuation before phrase matching.
pub fn canonical_guess(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .trim_end_matches(['?', '!', '.'])
        .trim_end()
        .to_string()
}

#[derive(Debug, Default)]
pub struct Game {
    state: GameState,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.game_over {
            Phase::GameOver
        } else {
            Phase::Active
        }
    }

    pub fn status(&self, model_ready: bool) -> StatusResponse {
        StatusResponse {
            model_ready,
            question_count: self.state.question_count,
            max_questions: MAX_QUESTIONS,
            game_over: self.state.game_over,
            guessed_correctly: self.state.guessed_correctly,
        }
    }

    /// Ask a yes/no-style question.
    ///
    /// Direct guesses are checked before the question is counted. The
    /// classifier is only consulted for questions that fit in the budget.
    pub fn ask<C>(&mut self, question: &str, classifier: &C) -> Result<AskResponse, GameError>
    where
        C: QuestionClassifier + ?Sized,
    {
        if self.state.game_over {
            return Ok(self.ask_reply(AskLabel::Outcome(Terminal::GameOver), Some(MSG_ALREADY_OVER)));
        }

        let text = canonical_guess(question);
        if ASK_DIRECT_GUESSES.contains(&text.as_str()) {
            self.state.game_over = true;
            self.state.guessed_correctly = true;
            return Ok(self.ask_reply(AskLabel::Outcome(Terminal::Guessed), Some(MSG_ASK_GUESSED)));
        }

        let count = self.state.question_count + 1;
        if count > MAX_QUESTIONS {
            self.state.question_count = count;
            self.state.game_over = true;
            let msg = format!("{} questions used! The answer was ROSE!", MAX_QUESTIONS);
            return Ok(self.ask_reply(AskLabel::Outcome(Terminal::GameOver), Some(&msg)));
        }

        // A failed classification leaves the state untouched.
        let label = classifier.classify(question)?;
        self.state.question_count = count;
        Ok(self.ask_reply(AskLabel::Category(label), None))
    }

    /// Name the answer. Wrong guesses spend a question.
    pub fn guess(&mut self, text: &str) -> GuessResponse {
        if self.state.game_over {
            return GuessResponse {
                correct: self.state.guessed_correctly,
                message: MSG_ALREADY_OVER.to_string(),
                question_count: self.state.question_count,
                game_over: true,
            };
        }

        let guess = canonical_guess(text);
        if GUESS_DIRECT_ANSWERS.contains(&guess.as_str()) {
            self.state.game_over = true;
            self.state.guessed_correctly = true;
            return GuessResponse {
                correct: true,
                message: MSG_GUESS_CORRECT.to_string(),
                question_count: self.state.question_count,
                game_over: true,
            };
        }

        self.state.question_count += 1;
        if self.state.question_count > MAX_QUESTIONS {
            self.state.game_over = true;
        }
        GuessResponse {
            correct: false,
            message: format!("Nope, it's not '{}'!", text.trim().to_lowercase()),
            question_count: self.state.question_count,
            game_over: self.state.game_over,
        }
    }

    pub fn reset(&mut self) {
        self.state = GameState::default();
    }

    fn ask_reply(&self, label: AskLabel, response: Option<&str>) -> AskResponse {
        AskResponse {
            label,
            response: response.map(str::to_string),
            question_count: self.state.question_count,
            max_questions: MAX_QUESTIONS,
            game_over: self.state.game_over,
            guessed_correctly: self.state.guessed_correctly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(Label, AtomicUsize);

    impl Fixed {
        fn new(label: Label) -> Self {
            Self(label, AtomicUsize::new(0))
        }

        fn calls(&self) -> usize {
            self.1.load(Ordering::SeqCst)
        }
    }

    impl QuestionClassifier for Fixed {
        fn classify(&self, _question: &str) -> Result<Label, GameError> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(self.0)
        }
    }

    #[test]
    fn test_canonical_guess() {
        assert_eq!(canonical_guess("  Is it a Rose?  "), "is it a rose");
        assert_eq!(canonical_guess("ROSE!"), "rose");
        assert_eq!(canonical_guess("tulip"), "tulip");
        assert_eq!(canonical_guess("?"), "");
    }

    #[test]
    fn test_ask_classifies_and_counts() {
        let mut game = Game::new();
        let clf = Fixed::new(Label::Close);
        let reply = game.ask("Is it red?", &clf).unwrap();
        assert_eq!(reply.label, AskLabel::Category(Label::Close));
        assert_eq!(reply.response, None);
        assert_eq!(reply.question_count, 1);
        assert_eq!(reply.max_questions, MAX_QUESTIONS);
        assert!(!reply.game_over);
        assert_eq!(clf.calls(), 1);
    }

    #[test]
    fn test_ask_direct_guess_does_not_count() {
        let mut game = Game::new();
        let clf = Fixed::new(Label::No);
        let reply = game.ask("is it a rose?", &clf).unwrap();
        assert_eq!(reply.label, AskLabel::Outcome(Terminal::Guessed));
        assert_eq!(reply.question_count, 0);
        assert!(reply.game_over);
        assert!(reply.guessed_correctly);
        assert_eq!(clf.calls(), 0);
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_ask_accepts_every_direct_phrase() {
        let clf = Fixed::new(Label::No);
        for phrase in ASK_DIRECT_GUESSES {
            let mut game = Game::new();
            let reply = game.ask(&phrase.to_uppercase(), &clf).unwrap();
            assert_eq!(reply.label, AskLabel::Outcome(Terminal::Guessed), "{}", phrase);
        }
    }

    #[test]
    fn test_budget_exhausted_on_twenty_first_question() {
        let mut game = Game::new();
        let clf = Fixed::new(Label::No);
        for i in 1..=MAX_QUESTIONS {
            let reply = game.ask("Is it a bird?", &clf).unwrap();
            assert_eq!(reply.question_count, i);
            assert!(!reply.game_over);
        }
        let reply = game.ask("Is it a bird?", &clf).unwrap();
        assert_eq!(reply.label, AskLabel::Outcome(Terminal::GameOver));
        assert_eq!(reply.question_count, MAX_QUESTIONS + 1);
        assert!(reply.game_over);
        assert!(!reply.guessed_correctly);
        assert_eq!(clf.calls(), MAX_QUESTIONS as usize);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut game = Game::new();
        let clf = Fixed::new(Label::Yes);
        game.ask("rose", &clf).unwrap();
        let before = game.state();

        let reply = game.ask("Is it red?", &clf).unwrap();
        assert_eq!(reply.label, AskLabel::Outcome(Terminal::GameOver));
        assert_eq!(reply.response.as_deref(), Some(MSG_ALREADY_OVER));
        assert!(reply.guessed_correctly);

        let guess = game.guess("tulip");
        assert!(guess.correct);
        assert!(guess.game_over);
        assert_eq!(game.state(), before);
        assert_eq!(clf.calls(), 0);
    }

    #[test]
    fn test_guess_correct() {
        let mut game = Game::new();
        let reply = game.guess("Rose");
        assert!(reply.correct);
        assert!(reply.game_over);
        assert_eq!(reply.question_count, 0);
        assert!(game.state().guessed_correctly);
    }

    #[test]
    fn test_guess_wrong_spends_a_question() {
        let mut game = Game::new();
        let reply = game.guess("  Tulip ");
        assert!(!reply.correct);
        assert!(!reply.game_over);
        assert_eq!(reply.question_count, 1);
        assert_eq!(reply.message, "Nope, it's not 'tulip'!");
    }

    #[test]
    fn test_guess_list_is_narrower_than_ask_list() {
        let mut game = Game::new();
        let reply = game.guess("its a rose");
        assert!(!reply.correct);
        assert_eq!(reply.question_count, 1);

        let mut game = Game::new();
        let reply = game.ask("its a rose", &Fixed::new(Label::No)).unwrap();
        assert_eq!(reply.label, AskLabel::Outcome(Terminal::Guessed));
    }

    #[test]
    fn test_wrong_guess_can_end_the_game() {
        let mut game = Game::new();
        for _ in 0..MAX_QUESTIONS {
            assert!(!game.guess("daisy").game_over);
        }
        let reply = game.guess("daisy");
        assert!(!reply.correct);
        assert!(reply.game_over);
        assert!(!game.state().guessed_correctly);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::new();
        let clf = Fixed::new(Label::No);
        game.ask("Is it a fish?", &clf).unwrap();
        game.guess("lily");
        game.guess("rose");
        assert_eq!(game.phase(), Phase::GameOver);

        game.reset();
        assert_eq!(game.state(), GameState::default());
        assert_eq!(game.phase(), Phase::Active);
        let status = game.status(true);
        assert_eq!(status.question_count, 0);
        assert!(!status.game_over);
        assert!(!status.guessed_correctly);
    }

    #[test]
    fn test_classifier_error_propagates() {
        struct Broken;
        impl QuestionClassifier for Broken {
            fn classify(&self, _q: &str) -> Result<Label, GameError> {
                Err(GameError::Inference("shape mismatch".into()))
            }
        }
        let mut game = Game::new();
        let err = game.ask("Is it red?", &Broken).unwrap_err();
        assert_eq!(err, GameError::Inference("shape mismatch".into()));
        assert_eq!(game.state(), GameState::default());

        let clf = Fixed::new(Label::Yes);
        let reply = game.ask("Is it red?", &clf).unwrap();
        assert_eq!(reply.question_count, 1);
    }
}
