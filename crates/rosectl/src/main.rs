//! Rose Control - CLI client for the Rose Day game
//!
//! Talks to rosed over HTTP.

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rosectl::cli::{Cli, Commands};
use rosectl::client::RoseClient;
use rosectl::{output, play};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = RoseClient::new(&cli.url);

    match cli.command {
        Commands::Status { json } => {
            let status = client.status().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", output::render_status(&status));
            }
        }
        Commands::Ask { question } => {
            let reply = client.ask(&question.join(" ")).await?;
            let mut rng = StdRng::from_entropy();
            println!("{}", output::render_ask(&reply, &mut rng));
        }
        Commands::Guess { answer } => {
            let reply = client.guess(&answer.join(" ")).await?;
            println!("{}", output::render_guess(&reply));
        }
        Commands::Reset => {
            let reply = client.reset().await?;
            println!("{}", reply.message);
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", output::render_health(&health));
        }
        Commands::Play => play::run(&client).await?,
    }

    Ok(())
}
