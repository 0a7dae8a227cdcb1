//! Rose Daemon - twenty questions game server
//!
//! Starts serving immediately and trains the answer classifier in the
//! background; classifier-backed endpoints answer 503 until it is ready.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rosed::bootstrap;
use rosed::config::Config;
use rosed::model_slot::ModelSlot;
use rosed::server;
use rosed::service::GameService;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Rose Day game daemon
#[derive(Parser)]
#[command(name = "rosed")]
#[command(version, long_about = None)]
struct Args {
    /// Config file (default /etc/rosed/config.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(long)]
    bind: Option<String>,

    /// Debug logging (ignored when RUST_LOG is set)
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("[BOOT] Rose Day daemon v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(args.config.as_deref());
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    info!(
        "[BOOT] Model dir {}, corpus {}, epochs {}",
        config.model.model_dir.display(),
        config.training.corpus_size,
        config.training.epochs
    );

    let slot = Arc::new(ModelSlot::new());
    let _training = bootstrap::spawn_training(config.clone(), Arc::clone(&slot));
    info!("[BOOT] Training started in background");

    let service = GameService::new(slot);
    server::run(config.server, service).await?;

    info!("[BOOT] Shutting down gracefully");
    Ok(())
}
