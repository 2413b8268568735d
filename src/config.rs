use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    tick_seconds, CHASE_SECS, DIRECTION_CHANGE_SECS, GHOST_COUNT, GHOST_SPEED, INITIAL_LIVES,
    INVINCIBILITY_SECS, PLAYER_SPEED, POWER_DURATION_SECS, SCATTER_SECS, TICK_RATE,
    VULNERABLE_SECS,
};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    #[serde(rename = "tickRate")]
    pub tick_rate: u32,
    #[serde(rename = "initialLives")]
    pub initial_lives: u32,
    #[serde(rename = "ghostCount")]
    pub ghost_count: usize,
    #[serde(rename = "powerDurationSecs")]
    pub power_duration_secs: f32,
    #[serde(rename = "invincibilitySecs")]
    pub invincibility_secs: f32,
    #[serde(rename = "playerSpeed")]
    pub player_speed: f32,
    #[serde(rename = "ghostSpeed")]
    pub ghost_speed: f32,
    #[serde(rename = "scatterSecs")]
    pub scatter_secs: f32,
    #[serde(rename = "chaseSecs")]
    pub chase_secs: f32,
    #[serde(rename = "vulnerableSecs")]
    pub vulnerable_secs: f32,
    #[serde(rename = "directionChangeSecs")]
    pub direction_change_secs: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            initial_lives: INITIAL_LIVES,
            ghost_count: GHOST_COUNT,
            power_duration_secs: POWER_DURATION_SECS,
            invincibility_secs: INVINCIBILITY_SECS,
            player_speed: PLAYER_SPEED,
            ghost_speed: GHOST_SPEED,
            scatter_secs: SCATTER_SECS,
            chase_secs: CHASE_SECS,
            vulnerable_secs: VULNERABLE_SECS,
            direction_change_secs: DIRECTION_CHANGE_SECS,
        }
    }
}

/// Per-ghost dwell timers, split out so ghosts do not hold the whole config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostTimings {
    pub scatter: f32,
    pub chase: f32,
    pub vulnerable: f32,
    pub direction_change: f32,
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tickRate must be positive".to_string()));
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::Invalid(
                "initialLives must be positive".to_string(),
            ));
        }
        let positive = [
            ("playerSpeed", self.player_speed),
            ("ghostSpeed", self.ghost_speed),
            ("scatterSecs", self.scatter_secs),
            ("chaseSecs", self.chase_secs),
            ("vulnerableSecs", self.vulnerable_secs),
            ("powerDurationSecs", self.power_duration_secs),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        let non_negative = [
            ("invincibilitySecs", self.invincibility_secs),
            ("directionChangeSecs", self.direction_change_secs),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative")));
            }
        }
        Ok(())
    }

    pub fn tick_seconds(&self) -> f32 {
        tick_seconds(self.tick_rate)
    }

    pub fn ghost_timings(&self) -> GhostTimings {
        GhostTimings {
            scatter: self.scatter_secs,
            chase: self.chase_secs,
            vulnerable: self.vulnerable_secs,
            direction_change: self.direction_change_secs,
        }
    }
}
