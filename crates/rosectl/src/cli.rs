//! CLI - Command-line argument parsing

use clap::{Parser, Subcommand};

use crate::DEFAULT_URL;

/// Rose Day game client
#[derive(Parser)]
#[command(name = "rosectl")]
#[command(about = "Play the Rose Day twenty questions game from a terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the rosed daemon
    #[arg(long, global = true, default_value = DEFAULT_URL)]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show game state and model readiness
    Status {
        /// Output JSON only
        #[arg(long)]
        json: bool,
    },

    /// Ask a yes/no question
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        question: Vec<String>,
    },

    /// Guess the answer
    Guess {
        #[arg(required = true, trailing_var_arg = true)]
        answer: Vec<String>,
    },

    /// Start a new game
    Reset,

    /// Daemon health and training phase
    Health,

    /// Interactive session: wait for the model, reset, then read questions from stdin
    Play,
}
