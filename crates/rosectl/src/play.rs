//! Interactive play session.

use std::io::Write;
use std::time::Duration;

use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rose_common::{HealthResponse, ModelPhase};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::RoseClient;
use crate::output;

/// Readiness poll interval while the daemon is still training.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayInput {
    Empty,
    Quit,
    Guess(String),
    Ask(String),
}

pub fn parse_input(line: &str) -> PlayInput {
    let line = line.trim();
    if line.is_empty() {
        return PlayInput::Empty;
    }
    let lower = line.to_lowercase();
    if lower == "quit" || lower == "exit" {
        return PlayInput::Quit;
    }
    if lower.starts_with("guess ") {
        let answer = line.get("guess ".len()..).unwrap_or("").trim();
        if !answer.is_empty() {
            return PlayInput::Guess(answer.to_string());
        }
    }
    PlayInput::Ask(line.to_string())
}

/// What the daemon's training phase means for a waiting player.
#[derive(Debug, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    Waiting,
    Failed(String),
}

pub fn readiness(health: &HealthResponse) -> Readiness {
    match health.model_phase {
        ModelPhase::Ready => Readiness::Ready,
        ModelPhase::Training => Readiness::Waiting,
        ModelPhase::Failed => Readiness::Failed(
            health
                .last_error
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        ),
    }
}

/// Block until the model is ready. Fails if the daemon's training failed,
/// since it never recovers without a restart.
pub async fn wait_for_model(client: &RoseClient) -> Result<()> {
    let mut announced = false;
    loop {
        match client.health().await {
            Ok(health) => match readiness(&health) {
                Readiness::Ready => return Ok(()),
                Readiness::Failed(reason) => {
                    return Err(anyhow!("rosed failed to start: {}", reason));
                }
                Readiness::Waiting => {}
            },
            Err(e) if !announced => {
                println!("{} {:#}", "[WAIT]".yellow(), e);
            }
            Err(_) => {}
        }
        if !announced {
            println!("{} Model is still loading. Please wait...", "[WAIT]".yellow());
            announced = true;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Run a full game against the daemon, reading from stdin.
pub async fn run(client: &RoseClient) -> Result<()> {
    wait_for_model(client).await?;
    client.reset().await?;

    println!();
    println!("I'm thinking of something. Ask me yes/no questions to figure it out!");
    println!("Type {} to name it, {} to leave.", "guess <answer>".cyan(), "quit".cyan());
    println!();

    let mut rng = StdRng::from_entropy();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".bright_blue());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            PlayInput::Empty => continue,
            PlayInput::Quit => break,
            PlayInput::Guess(answer) => match client.guess(&answer).await {
                Ok(reply) => {
                    println!("{}", output::render_guess(&reply));
                    if reply.game_over {
                        break;
                    }
                }
                Err(e) => println!("{} {:#}", "[ERROR]".bright_red(), e),
            },
            PlayInput::Ask(question) => match client.ask(&question).await {
                Ok(reply) => {
                    println!("{}", output::render_ask(&reply, &mut rng));
                    if reply.game_over {
                        break;
                    }
                }
                Err(e) => println!("{} {:#}", "[ERROR]".bright_red(), e),
            },
        }
    }
    Ok(())
}
