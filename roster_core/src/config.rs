use crate::opponents::DEFAULT_CANDIDATE_NAMES;
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wrestler_core::{Wrestler, MAX_LEVEL};

/// TOML configuration for the roster store and opponent generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Maximum number of captured wrestlers
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_level_min")]
    pub opponent_level_min: u32,
    #[serde(default = "default_level_max")]
    pub opponent_level_max: u32,
    /// Pool of names opponents are drawn from
    #[serde(default = "default_candidate_names")]
    pub candidate_names: Vec<String>,
    /// Stats of the active player when no save exists
    #[serde(default)]
    pub default_player: DefaultPlayerConfig,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            capacity: default_capacity(),
            opponent_level_min: default_level_min(),
            opponent_level_max: default_level_max(),
            candidate_names: default_candidate_names(),
            default_player: DefaultPlayerConfig::default(),
        }
    }
}

impl RosterConfig {
    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: path.to_path_buf(),
        })?;

        let config: RosterConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config from a TOML string
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: RosterConfig =
            toml::from_str(toml).map_err(|e| ConfigError::Parse { error: e, path: None })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.opponent_level_min < 1 {
            return Err(ConfigError::Validation(
                "opponent_level_min must be at least 1".to_string(),
            ));
        }
        if self.opponent_level_min > self.opponent_level_max {
            return Err(ConfigError::Validation(format!(
                "opponent_level_min ({}) exceeds opponent_level_max ({})",
                self.opponent_level_min, self.opponent_level_max
            )));
        }
        if self.opponent_level_max > MAX_LEVEL {
            return Err(ConfigError::Validation(format!(
                "opponent_level_max ({}) exceeds the maximum level {}",
                self.opponent_level_max, MAX_LEVEL
            )));
        }
        if !(1..=MAX_LEVEL).contains(&self.default_player.level) {
            return Err(ConfigError::Validation(format!(
                "default_player.level must be between 1 and {}, got {}",
                MAX_LEVEL, self.default_player.level
            )));
        }
        if self.candidate_names.is_empty() {
            return Err(ConfigError::Validation(
                "candidate_names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Starting stats of the auto-created active player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultPlayerConfig {
    #[serde(default = "default_player_name")]
    pub name: String,
    #[serde(default = "default_player_level")]
    pub level: u32,
    #[serde(default = "default_player_hp")]
    pub hp: u32,
    #[serde(default = "default_player_hp")]
    pub max_hp: u32,
    #[serde(default = "default_player_power")]
    pub power: u32,
    #[serde(default = "default_player_speed")]
    pub speed: u32,
    #[serde(default = "default_player_charisma")]
    pub charisma: u32,
}

impl Default for DefaultPlayerConfig {
    fn default() -> Self {
        DefaultPlayerConfig {
            name: default_player_name(),
            level: default_player_level(),
            hp: default_player_hp(),
            max_hp: default_player_hp(),
            power: default_player_power(),
            speed: default_player_speed(),
            charisma: default_player_charisma(),
        }
    }
}

impl DefaultPlayerConfig {
    /// Build the player wrestler: the level template with stats overridden
    pub fn build(&self) -> Wrestler {
        let mut player = Wrestler::new(self.name.clone(), self.level);
        player.max_hp = self.max_hp;
        player.hp = self.hp;
        player.power = self.power;
        player.speed = self.speed;
        player.charisma = self.charisma;
        player.clamp_hp();
        player
    }
}

fn default_capacity() -> usize {
    6
}
fn default_level_min() -> u32 {
    1
}
fn default_level_max() -> u32 {
    5
}
fn default_candidate_names() -> Vec<String> {
    DEFAULT_CANDIDATE_NAMES.iter().map(|s| s.to_string()).collect()
}
fn default_player_name() -> String {
    "Your Custom Wrestler".to_string()
}
fn default_player_level() -> u32 {
    5
}
fn default_player_hp() -> u32 {
    150
}
fn default_player_power() -> u32 {
    25
}
fn default_player_speed() -> u32 {
    20
}
fn default_player_charisma() -> u32 {
    18
}
