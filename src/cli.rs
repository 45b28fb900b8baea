//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use tictactoe_engine::GameMode;

/// Best-of-three tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Best-of-three tic-tac-toe against a friend or a random bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match, reading one command per line from stdin
    Play {
        /// singleplayer (against the bot) or multiplayer; overrides the config file
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// Path to the play configuration file
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: std::path::PathBuf,

        /// Seed for the bot's moves
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before each bot move, in milliseconds
        #[arg(long)]
        bot_delay_ms: Option<u64>,

        /// Print each outcome as a JSON line instead of a board
        #[arg(long)]
        json: bool,
    },
}
