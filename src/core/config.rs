//! Engine configuration.
//!
//! All gameplay constants are supplied by the host. Defaults mirror the
//! standard 6x20 cylinder with four colours.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants::*;
use super::error::{EngineError, EngineResult};

/// Suggested animation pacing attached to emitted events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    /// How long a destroyed tile's blast animation plays.
    pub blast_secs: f32,
    /// How long a tile takes to fall into its new cell.
    pub fall_secs: f32,
    /// Pause before falling starts once the blast is over.
    pub fall_delay_secs: f32,
    /// Stagger between successive spawns in the same column.
    pub spawn_delay_secs: f32,
    /// Pause between two detonations of a bomb chain.
    pub chain_delay_secs: f32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            blast_secs: BLAST_ANIMATION_SECS,
            fall_secs: FALL_ANIMATION_SECS,
            fall_delay_secs: FALL_ANIMATION_DELAY_SECS,
            spawn_delay_secs: SPAWN_ANIMATION_DELAY_SECS,
            chain_delay_secs: CHAIN_EXPLOSION_DELAY_SECS,
        }
    }
}

impl AnimationTiming {
    /// Zero-length pacing, for hosts that apply every event instantly.
    pub fn instant() -> Self {
        Self {
            blast_secs: 0.0,
            fall_secs: 0.0,
            fall_delay_secs: 0.0,
            spawn_delay_secs: 0.0,
            chain_delay_secs: 0.0,
        }
    }
}

/// Host-supplied constants for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of rows (row 0 is the top edge).
    pub rows: usize,
    /// Number of columns around the cylinder.
    pub cols: usize,
    /// Smallest connected group that resolves.
    pub minimum_match_count: usize,
    /// Group size from which a bomb is left at the activated cell.
    pub bomb_spawn_threshold: usize,
    /// Flat damage a detonating bomb deals to each adjacent obstacle.
    pub bomb_damage: u32,
    /// Starting durability of every obstacle.
    pub obstacle_durability: u32,
    /// Number of colour types; colours are `1..=color_type_count`.
    pub color_type_count: u8,
    /// Presentation pacing hints.
    pub timing: AnimationTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: ROW_COUNT,
            cols: COL_COUNT,
            minimum_match_count: MINIMUM_MATCH_COUNT,
            bomb_spawn_threshold: BOMB_SPAWN_THRESHOLD,
            bomb_damage: BOMB_DAMAGE,
            obstacle_durability: OBSTACLE_DURABILITY,
            color_type_count: COLOR_TYPE_COUNT,
            timing: AnimationTiming::default(),
        }
    }
}

impl EngineConfig {
    /// Config for a grid of the given size, other values default.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Small matches resolve and bombs spawn eagerly. Handy for exercising
    /// chains in tests and demos.
    pub fn casual() -> Self {
        Self {
            minimum_match_count: 2,
            bomb_spawn_threshold: 4,
            ..Default::default()
        }
    }

    /// Parse a JSON document. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rows == 0 {
            return Err(EngineError::InvalidConfig("rows must be at least 1".into()));
        }
        // Column parity drives the diagonal neighbours, so the wrap seam only
        // stays symmetric when the column count is even.
        if self.cols < 2 || self.cols % 2 != 0 {
            return Err(EngineError::InvalidConfig(format!(
                "cols must be an even number >= 2, got {}",
                self.cols
            )));
        }
        if self.minimum_match_count == 0 {
            return Err(EngineError::InvalidConfig(
                "minimum_match_count must be at least 1".into(),
            ));
        }
        if self.bomb_spawn_threshold == 0 {
            return Err(EngineError::InvalidConfig(
                "bomb_spawn_threshold must be at least 1".into(),
            ));
        }
        if self.obstacle_durability == 0 {
            return Err(EngineError::InvalidConfig(
                "obstacle_durability must be at least 1".into(),
            ));
        }
        if self.color_type_count == 0 {
            return Err(EngineError::InvalidConfig(
                "color_type_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 20);
        assert_eq!(config.color_type_count, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_odd_columns_rejected() {
        let config = EngineConfig::with_size(6, 7);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = EngineConfig::default();
        config.rows = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.obstacle_durability = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.color_type_count = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.minimum_match_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "rows": 8, "bomb_damage": 5 }"#).unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.bomb_damage, 5);
        assert_eq!(config.cols, COL_COUNT);
        assert_eq!(config.timing, AnimationTiming::default());
    }

    #[test]
    fn test_invalid_json_config() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(EngineError::ConfigParse(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "cols": 5 }"#),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("hexfall-test-missing-config.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            EngineConfig::load(&path),
            Err(EngineError::ConfigIo(_))
        ));
    }

    #[test]
    fn test_load_round_trip_file() {
        let path = std::env::temp_dir().join(format!(
            "hexfall-test-config-{}.json",
            std::process::id()
        ));
        let config = EngineConfig::casual();
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
