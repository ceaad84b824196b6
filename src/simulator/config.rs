//! Simulation configuration.

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::constants::{SIM_DEFAULT_MOVES_PER_RUN, SIM_DEFAULT_RUNS};
use crate::levels::Level;

/// How the autoplayer picks the next cell to activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveStrategy {
    /// Any in-bounds cell, uniformly.
    #[default]
    Random,
    /// Largest resolvable group, or a bomb when no group qualifies.
    Greedy,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of games to play
    pub num_runs: u32,

    /// Activations per game
    pub moves_per_run: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    pub level: Level,

    pub strategy: MoveStrategy,

    /// Rules the engine plays by
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: SIM_DEFAULT_RUNS,
            moves_per_run: SIM_DEFAULT_MOVES_PER_RUN,
            seed: None,
            level: Level::Classic,
            strategy: MoveStrategy::Random,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking a single layout
    pub fn level_check(level: Level) -> Self {
        Self {
            num_runs: 20,
            moves_per_run: 100,
            level,
            ..Default::default()
        }
    }

    /// Greedy play on the obstacle-heavy layouts
    pub fn obstacle_clearing() -> Self {
        Self {
            num_runs: 50,
            moves_per_run: 300,
            level: Level::BombChambers,
            strategy: MoveStrategy::Greedy,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_standard_rules() {
        let config = SimConfig::default();
        assert_eq!(config.num_runs, SIM_DEFAULT_RUNS);
        assert_eq!(config.engine, EngineConfig::default());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_presets() {
        assert_eq!(SimConfig::level_check(Level::BombGrid).level, Level::BombGrid);
        assert_eq!(SimConfig::obstacle_clearing().strategy, MoveStrategy::Greedy);
    }
}
