//! Game configuration.
//!
//! A `GameConfig` fixes the number of players and the optional round limit.
//! It can be built in code or loaded from a JSON file; missing fields take
//! their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::player::{valid_player_count, MAX_PLAYERS};

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player count must be between 2 and 6, got {0}")]
    PlayerCount(u8),
}

/// Rules parameters of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of players, 2 to 6.
    pub player_count: u8,
    /// Round after which the game is decided on territory count.
    /// `None` plays until someone wins outright.
    pub round_limit: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player_count: MAX_PLAYERS,
            round_limit: None,
        }
    }
}

impl GameConfig {
    /// Checks the configuration for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !valid_player_count(self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        GameConfig::from_json_str(&text)
    }
}
