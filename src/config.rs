//! Per-level configuration
//!
//! Loaded from JSON by the page (or the native runner). Missing fields fall
//! back to the classic creek level.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::placement::Placement;

/// Level tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Rocks that must be flipped to finish the level
    pub total_objects: usize,
    /// Player must be strictly closer than this to flip a rock
    pub proximity_radius: f32,
    /// Chance (0-100) that a flip turns up trash
    pub hazard_probability_percent: u8,
    /// Points per bug found
    pub finding_reward: i32,
    /// Player walking speed (display units per second)
    pub player_speed: f32,
    /// Where the rocks go
    pub placement: Placement,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl LevelConfig {
    /// Twelve rocks, 20% trash
    pub fn classic() -> Self {
        Self {
            total_objects: TOTAL_OBJECTS,
            proximity_radius: PROXIMITY_RADIUS,
            hazard_probability_percent: HAZARD_PROBABILITY_PERCENT,
            finding_reward: FINDING_REWARD,
            player_speed: PLAYER_SPEED,
            placement: Placement::classic(),
        }
    }

    /// Early levels: every rock hides a bug
    pub fn no_hazards() -> Self {
        Self {
            hazard_probability_percent: 0,
            ..Self::classic()
        }
    }

    /// Parse and validate a config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_objects == 0 {
            return Err(ConfigError::NoObjects);
        }
        if self.hazard_probability_percent > 100 {
            return Err(ConfigError::HazardProbability(self.hazard_probability_percent));
        }
        if !(self.proximity_radius > 0.0 && self.proximity_radius.is_finite()) {
            return Err(ConfigError::ProximityRadius(self.proximity_radius));
        }
        if !(self.player_speed >= 0.0 && self.player_speed.is_finite()) {
            return Err(ConfigError::PlayerSpeed(self.player_speed));
        }
        self.placement.validate(self.total_objects)
    }
}
