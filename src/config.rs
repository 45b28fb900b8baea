//! Play configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::{GameMode, Mark, MatchSetup};
use tracing::{debug, info, instrument};

/// Settings for a terminal session.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Mode used when `--mode` is not given.
    mode: GameMode,

    /// Name of the X player.
    player_x_name: String,

    /// Name of the O player in multiplayer.
    player_o_name: String,

    /// Name of the bot in singleplayer.
    bot_name: String,

    /// Mark that opens the first round.
    starting_mark: Mark,

    /// Pause before each bot move, in milliseconds.
    bot_delay_ms: u64,

    /// Fixed bot seed; random when absent.
    seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Singleplayer,
            player_x_name: "Player 1".to_string(),
            player_o_name: "Player 2".to_string(),
            bot_name: "Bot".to_string(),
            starting_mark: Mark::X,
            bot_delay_ms: 600,
            seed: None,
        }
    }
}

impl PlayConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` when it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the mode.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the bot seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides the bot delay.
    pub fn with_bot_delay_ms(mut self, delay: u64) -> Self {
        self.bot_delay_ms = delay;
        self
    }

    /// Match setup for the engine.
    pub fn match_setup(&self) -> MatchSetup {
        MatchSetup::new(self.mode)
            .with_names(self.player_x_name.clone(), self.player_o_name.clone())
            .with_bot_name(self.bot_name.clone())
            .with_starting_mark(self.starting_mark)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
