//! Shell configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use xo_clash_engine::{OpponentMode, DEFAULT_PLAYER_NAME};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "xo_clash.toml";

/// Configuration for a terminal game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Name shown for the Cross seat.
    #[serde(default = "default_player_name")]
    player_name: String,

    /// Who plays Circle.
    #[serde(default)]
    opponent: OpponentMode,

    /// Pause before the bot's move appears, in milliseconds.
    #[serde(default = "default_bot_delay_ms")]
    bot_delay_ms: u64,

    /// Fixed seed for the bot; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_player_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

#[instrument]
fn default_bot_delay_ms() -> u64 {
    500
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            opponent: OpponentMode::default(),
            bot_delay_ms: default_bot_delay_ms(),
            seed: None,
        }
    }
}

impl ShellConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(player_name = %config.player_name, opponent = ?config.opponent, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of file values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        player_name: Option<String>,
        opponent: Option<OpponentMode>,
        bot_delay_ms: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(name) = player_name {
            self.player_name = name;
        }
        if let Some(opponent) = opponent {
            self.opponent = opponent;
        }
        if let Some(delay) = bot_delay_ms {
            self.bot_delay_ms = delay;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Bot delay as a duration.
    pub fn bot_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.bot_delay_ms)
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
