//! tictactoe - best-of-three tic-tac-toe in the terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tictactoe::{Cli, Command, PlayConfig, Session, SessionEnd};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            config,
            seed,
            bot_delay_ms,
            json,
        } => run_play(config, mode, seed, bot_delay_ms, json),
    }
}

/// Load config, apply flag overrides, and play on stdin/stdout.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
fn run_play(
    config_path: std::path::PathBuf,
    mode: Option<tictactoe_engine::GameMode>,
    seed: Option<u64>,
    bot_delay_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = PlayConfig::load_or_default(&config_path)
        .with_context(|| format!("Loading {}", config_path.display()))?;
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(delay) = bot_delay_ms {
        config = config.with_bot_delay_ms(delay);
    }

    info!(mode = %config.mode(), seed = ?config.seed(), "Starting session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let end = Session::new(config, stdin.lock(), stdout.lock())
        .with_json(json)
        .run()?;

    info!(?end, "Session ended");
    if end == SessionEnd::BackToSetup {
        println!("No match in progress. Run `tictactoe play` to set up a new one.");
    }
    Ok(())
}

/// Logs go to stderr so the board on stdout stays readable. `RUST_LOG`
/// (or `.env`) raises the level, e.g. `tictactoe_engine=debug`.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
