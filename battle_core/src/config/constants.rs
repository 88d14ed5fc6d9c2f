//! Tunable battle constants

use super::ConfigError;
use crate::damage::DamageFormula;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What happens to the experience reward after a victory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperiencePolicy {
    /// Add the reward to the player and level up once if the threshold is met
    #[default]
    Award,
    /// Only report the reward; the player record is left alone
    ReportOnly,
}

/// How a retry after defeat restores the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Restart with both wrestlers exactly as staged when the encounter began
    #[default]
    RestartFromHandoff,
    /// Restart from the staged state, but with the player at full HP
    FullHeal,
}

/// Battle tuning, loaded from TOML with defaults for every field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleConstants {
    /// Pause before the opponent acts, in milliseconds
    #[serde(default = "default_opponent_turn_delay_ms")]
    pub opponent_turn_delay_ms: u64,
    /// Defender speed is multiplied by this and subtracted from raw damage
    #[serde(default = "default_speed_reduction_factor")]
    pub speed_reduction_factor: f64,
    /// Final damage varies by this fraction either way
    #[serde(default = "default_damage_variance")]
    pub damage_variance: f64,
    /// Experience reward per level of the defeated opponent
    #[serde(default = "default_experience_per_opponent_level")]
    pub experience_per_opponent_level: u32,
    /// Level-up threshold is `level * experience_per_level`
    #[serde(default = "default_experience_per_level")]
    pub experience_per_level: u32,
    #[serde(default)]
    pub experience_policy: ExperiencePolicy,
    #[serde(default)]
    pub retry_policy: RetryPolicy,
}

impl Default for BattleConstants {
    fn default() -> Self {
        BattleConstants {
            opponent_turn_delay_ms: default_opponent_turn_delay_ms(),
            speed_reduction_factor: default_speed_reduction_factor(),
            damage_variance: default_damage_variance(),
            experience_per_opponent_level: default_experience_per_opponent_level(),
            experience_per_level: default_experience_per_level(),
            experience_policy: ExperiencePolicy::default(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl BattleConstants {
    /// Load constants from a TOML file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let constants: BattleConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let constants: BattleConstants = super::parse_toml(toml)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.damage_variance) {
            return Err(ConfigError::ValidationError(format!(
                "damage_variance must be in [0, 1), got {}",
                self.damage_variance
            )));
        }
        if !self.speed_reduction_factor.is_finite() || self.speed_reduction_factor < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "speed_reduction_factor must be a non-negative number, got {}",
                self.speed_reduction_factor
            )));
        }
        if self.experience_per_level == 0 {
            return Err(ConfigError::ValidationError(
                "experience_per_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn opponent_turn_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_turn_delay_ms)
    }

    pub fn damage_formula(&self) -> DamageFormula {
        DamageFormula {
            speed_reduction_factor: self.speed_reduction_factor,
            variance: self.damage_variance,
        }
    }

    /// Experience awarded for beating an opponent of `opponent_level`
    pub fn experience_reward(&self, opponent_level: u32) -> u32 {
        opponent_level.saturating_mul(self.experience_per_opponent_level)
    }
}

fn default_opponent_turn_delay_ms() -> u64 {
    1500
}
fn default_speed_reduction_factor() -> f64 {
    0.1
}
fn default_damage_variance() -> f64 {
    0.2
}
fn default_experience_per_opponent_level() -> u32 {
    50
}
fn default_experience_per_level() -> u32 {
    100
}
