//! Simulation configuration
//!
//! Supplied once at construction and never mutated afterwards. Every field has
//! a default from [`crate::consts`], so JSON overrides may be partial.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration load/validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Immutable tuning for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Physics ===
    pub gravity: f32,
    pub charge_rate: f32,
    pub min_power: f32,
    pub max_power: f32,
    pub jump_angle_deg: f32,

    // === Platform generation ===
    pub min_distance: f32,
    pub max_distance: f32,
    /// Random spacing added on top of the difficulty-scaled distance
    pub distance_jitter: (f32, f32),
    /// Random vertical offset between consecutive platforms
    pub vertical_jitter: (f32, f32),
    pub direction_flip_chance: f32,
    pub special_platform_chance: f32,
    /// Specials only appear once the track holds at least this many platforms
    pub special_min_platforms: usize,
    pub special_width_scale: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_depth: f32,
    pub ahead_buffer: usize,
    pub initial_platforms: usize,
    pub pool_prealloc: usize,
    pub recycle_margin: f32,

    // === Landing ===
    pub perfect_radius: f32,
    pub safe_radius: f32,
    pub landing_tolerance: f32,
    pub fall_through_margin: f32,
    pub landing_grace: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Scoring ===
    pub difficulty_max_score: f32,
    pub base_score: u64,
    pub perfect_bonus: u64,
    /// Indexed by combo count; the last value repeats for longer combos
    pub combo_bonus_table: Vec<u64>,
    pub special_score_value: u64,

    // === Camera / view ===
    pub view_width: f32,
    pub view_height: f32,
    pub camera_smoothing: f32,
    pub camera_offset_y: f32,
    pub max_frame_dt: f32,

    /// Seed for platform generation
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            charge_rate: CHARGE_RATE,
            min_power: MIN_POWER,
            max_power: MAX_POWER,
            jump_angle_deg: JUMP_ANGLE_DEG,

            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            distance_jitter: (-30.0, 50.0),
            vertical_jitter: (-50.0, 30.0),
            direction_flip_chance: DIRECTION_FLIP_CHANCE,
            special_platform_chance: SPECIAL_PLATFORM_CHANCE,
            special_min_platforms: 4,
            special_width_scale: SPECIAL_WIDTH_SCALE,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_depth: PLATFORM_DEPTH,
            ahead_buffer: AHEAD_BUFFER,
            initial_platforms: 4,
            pool_prealloc: POOL_PREALLOC,
            recycle_margin: RECYCLE_MARGIN,

            perfect_radius: PERFECT_RADIUS,
            safe_radius: SAFE_RADIUS,
            landing_tolerance: LANDING_TOLERANCE,
            fall_through_margin: FALL_THROUGH_MARGIN,
            landing_grace: LANDING_GRACE,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            difficulty_max_score: DIFFICULTY_MAX_SCORE,
            base_score: BASE_SCORE,
            perfect_bonus: PERFECT_BONUS,
            combo_bonus_table: vec![0, 0, 2, 4, 6, 8],
            special_score_value: SPECIAL_SCORE,

            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            camera_smoothing: CAMERA_SMOOTHING,
            camera_offset_y: CAMERA_OFFSET_Y,
            max_frame_dt: MAX_FRAME_DT,

            seed: 0x5EED,
        }
    }
}

impl SimulationConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file from disk
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check cross-field constraints the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.gravity <= 0.0 {
            return invalid("gravity must be positive");
        }
        if self.min_power <= 0.0 || self.min_power > self.max_power {
            return invalid("power bounds must satisfy 0 < min_power <= max_power");
        }
        if self.min_distance > self.max_distance {
            return invalid("min_distance must not exceed max_distance");
        }
        if self.distance_jitter.0 > self.distance_jitter.1
            || self.vertical_jitter.0 > self.vertical_jitter.1
        {
            return invalid("jitter ranges must be ordered (min, max)");
        }
        if self.perfect_radius < 0.0
            || self.perfect_radius > self.safe_radius
            || self.safe_radius > self.platform_width / 2.0
        {
            return invalid("landing zones must nest: perfect <= safe <= platform half width");
        }
        if self.combo_bonus_table.is_empty() {
            return invalid("combo_bonus_table must not be empty");
        }
        for p in [self.direction_flip_chance, self.special_platform_chance] {
            if !(0.0..=1.0).contains(&p) {
                return invalid("probabilities must lie in [0, 1]");
            }
        }
        if self.difficulty_max_score <= 0.0 {
            return invalid("difficulty_max_score must be positive");
        }
        if self.view_width <= 0.0 || self.view_height <= 0.0 {
            return invalid("view size must be positive");
        }
        if self.ahead_buffer < 2 || self.initial_platforms < 2 {
            return invalid("at least two platforms must be kept ahead");
        }
        if self.max_frame_dt <= 0.0 {
            return invalid("max_frame_dt must be positive");
        }
        Ok(())
    }

    /// Launch angle in radians
    pub fn jump_angle(&self) -> f32 {
        crate::deg_to_rad(self.jump_angle_deg)
    }

    /// Combo bonus for a given combo count (last entry repeats)
    pub fn combo_bonus(&self, combo: u32) -> u64 {
        let last = self.combo_bonus_table.len().saturating_sub(1);
        let index = (combo as usize).min(last);
        self.combo_bonus_table.get(index).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json(r#"{ "gravity": 1000.0, "seed": 7 }"#).unwrap();
        assert_eq!(config.gravity, 1000.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_power, MAX_POWER);
        assert_eq!(config.combo_bonus_table, vec![0, 0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_rejects_unnested_zones() {
        let err = SimulationConfig::from_json(r#"{ "perfect_radius": 45.0, "safe_radius": 40.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SimulationConfig::from_json(r#"{ "safe_radius": 60.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SimulationConfig::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_combo_bonus_repeats_last_entry() {
        let config = SimulationConfig::default();
        assert_eq!(config.combo_bonus(0), 0);
        assert_eq!(config.combo_bonus(2), 2);
        assert_eq!(config.combo_bonus(5), 8);
        assert_eq!(config.combo_bonus(40), 8);
    }
}
