//! # Configuration
//!
//! Textquest reads a small TOML file with two sections:
//!
//! ```toml
//! [game]
//! world_file = "data/worlds/lighthouse.json"
//! save_file = "data/saves/quicksave.json"
//! player_name = "Adventurer"
//! max_weight = 13
//! starting_health = 100
//! max_input_length = 120
//!
//! [logging]
//! level = "info"
//! file = "textquest.log"
//! ```
//!
//! Every field has a default, so a partial file (or none at all, via
//! [`Config::default`]) is valid. Command-line flags override the file.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    /// World loaded when a new game starts.
    #[serde(default = "default_world_file")]
    pub world_file: String,
    /// Slot used by SAVE and RESTORE.
    #[serde(default = "default_save_file")]
    pub save_file: String,
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Carrying capacity of a new player.
    #[serde(default = "default_max_weight")]
    pub max_weight: i32,
    #[serde(default = "default_starting_health")]
    pub starting_health: i32,
    /// Longer input lines are refused.
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,
}

fn default_world_file() -> String {
    "data/worlds/lighthouse.json".to_string()
}

fn default_save_file() -> String {
    "data/saves/quicksave.json".to_string()
}

fn default_player_name() -> String {
    "Adventurer".to_string()
}

fn default_max_weight() -> i32 {
    13
}

fn default_starting_health() -> i32 {
    crate::adventure::player::MAX_HEALTH
}

fn default_max_input_length() -> usize {
    120
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_file: default_world_file(),
            save_file: default_save_file(),
            player_name: default_player_name(),
            max_weight: default_max_weight(),
            starting_health: default_starting_health(),
            max_input_length: default_max_input_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append-mode log file. Stdout and stderr carry the game itself, so
    /// logs only go to the terminal when this is unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: Some("textquest.log".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;
        config.validate()?;

        Ok(config)
    }

    /// Write the default configuration to `path`.
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.max_weight < 0 {
            return Err(anyhow!("game.max_weight must not be negative"));
        }
        if self.game.starting_health <= 0 {
            return Err(anyhow!("game.starting_health must be positive"));
        }
        if self.game.max_input_length == 0 {
            return Err(anyhow!("game.max_input_length must be at least 1"));
        }
        if self.game.world_file.trim().is_empty() || self.game.save_file.trim().is_empty() {
            return Err(anyhow!("game.world_file and game.save_file must be set"));
        }
        Ok(())
    }
}
