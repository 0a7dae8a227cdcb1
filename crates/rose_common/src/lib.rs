//! Rose Common - Shared game core for the rose guessing game
//!
//! Everything here is pure: no model weights, no sockets, no files.
//! The daemon (`rosed`) wires these pieces to the embedding model and HTTP,
//! the control client (`rosectl`) reuses the wire types.

pub mod corpus;
pub mod error;
pub mod game;
pub mod labels;
pub mod normalize;
pub mod protocol;
pub mod taxonomy;

pub use error::GameError;
pub use game::{Game, GameState, Phase, QuestionClassifier};
pub use labels::{AskLabel, Label, Terminal};
pub use protocol::*;

/// The hidden answer. Fixed for the lifetime of the product.
pub const ANSWER: &str = "rose";

/// Maximum number of non-terminal questions before the game is forced over.
pub const MAX_QUESTIONS: u32 = 20;

/// Output dimension of the sentence embedding model (all-MiniLM-L6-v2).
pub const EMBED_DIM: usize = 384;
