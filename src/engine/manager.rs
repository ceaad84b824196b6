//! The engine aggregate: owns the grid, configuration and RNG, and routes
//! activations to the right sub-engine.

use rand::Rng;

use super::bomb_chain;
use super::connectivity::{self, MatchResult};
use super::events::MutationEvent;
use super::obstacles::{self, ObstacleState};
use super::resolution::{self, Compaction};
use super::timeline::{self, TimedEvent};
use crate::board::{Grid, Position, Tile, TileKind};
use crate::core::config::EngineConfig;
use crate::core::error::EngineResult;
use crate::levels::{Level, LevelLayout};

/// A running puzzle. Every public mutation runs to completion before it
/// returns; hosts must not start a new activation while they are still
/// consuming the previous event list.
#[derive(Debug, Clone)]
pub struct Engine<R: Rng> {
    grid: Grid,
    config: EngineConfig,
    level: Option<Level>,
    rng: R,
}

impl<R: Rng> Engine<R> {
    /// Start `level` with a validated config.
    pub fn new(config: EngineConfig, level: Level, mut rng: R) -> EngineResult<Self> {
        config.validate()?;
        let grid = level.build_grid(&config, &mut rng);
        tracing::debug!(
            level = level.name(),
            rows = config.rows,
            cols = config.cols,
            "level started"
        );
        Ok(Self {
            grid,
            config,
            level: Some(level),
            rng,
        })
    }

    /// Start from a host-supplied layout function.
    pub fn with_layout<F>(config: EngineConfig, rng: R, layout: F) -> EngineResult<Self>
    where
        F: FnMut(Position) -> TileKind,
    {
        config.validate()?;
        let grid = Grid::from_layout(config.rows, config.cols, config.obstacle_durability, layout);
        Self::from_grid(config, grid, rng)
    }

    /// Adopt an existing grid. The config's dimensions are taken from the grid.
    pub fn from_grid(mut config: EngineConfig, grid: Grid, rng: R) -> EngineResult<Self> {
        config.rows = grid.rows();
        config.cols = grid.cols();
        config.validate()?;
        grid.validate()?;
        Ok(Self {
            grid,
            config,
            level: None,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The built-in level being played, if any.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Rebuild the grid for `level`, discarding the current board.
    pub fn restart(&mut self, level: Level) {
        self.grid = level.build_grid(&self.config, &mut self.rng);
        self.level = Some(level);
        tracing::debug!(level = level.name(), "level restarted");
    }

    /// Handle a player activating `(row, col)`.
    ///
    /// Coloured tiles go through group search and match resolution, bombs
    /// start a chain. Empty and obstacle cells are a no-op. Positions outside
    /// the grid are rejected; input columns are not wrapped.
    pub fn activate_cell(&mut self, row: usize, col: usize) -> EngineResult<Vec<MutationEvent>> {
        let pos = match self.grid.checked_position(row, col) {
            Ok(pos) => pos,
            Err(err) => {
                tracing::warn!(row, col, "activation outside the grid");
                return Err(err);
            }
        };

        let events = match self.grid.get(pos) {
            Some(Tile::Colored { .. }) => match connectivity::find_match(&self.grid, pos) {
                Some(found) => self.resolve_match(&found)?,
                None => Vec::new(),
            },
            Some(Tile::Bomb { .. }) => self.activate_bomb(pos)?,
            Some(Tile::Obstacle { .. }) | None => {
                tracing::trace!(pos = %pos, "activation ignored");
                Vec::new()
            }
        };

        Ok(events)
    }

    /// Group search from `origin` without touching the grid.
    pub fn find_match(&self, origin: Position) -> Option<MatchResult> {
        connectivity::find_match(&self.grid, origin)
    }

    /// Resolve a group previously returned by [`find_match`](Self::find_match)
    /// on the current grid.
    pub fn resolve_match(&mut self, found: &MatchResult) -> EngineResult<Vec<MutationEvent>> {
        let events = resolution::resolve_match(&mut self.grid, &self.config, found, &mut self.rng)?;
        self.enforce_invariants();
        Ok(events)
    }

    /// Detonate the bomb at `pos` and everything it chains into.
    pub fn activate_bomb(&mut self, pos: Position) -> EngineResult<Vec<MutationEvent>> {
        let pos = self.grid.checked_position(pos.row, pos.col)?;
        let events = bomb_chain::activate_bomb(&mut self.grid, &self.config, pos, &mut self.rng)?;
        self.enforce_invariants();
        Ok(events)
    }

    /// Run a gravity pass only, leaving gaps at the top of the columns.
    pub fn compact(&mut self) -> EngineResult<Compaction> {
        let compaction = resolution::compact(&mut self.grid)?;
        self.enforce_invariants();
        Ok(compaction)
    }

    /// Gravity followed by refill.
    pub fn settle(&mut self) -> EngineResult<Vec<MutationEvent>> {
        let events = resolution::settle(&mut self.grid, &self.config, &mut self.rng)?;
        self.enforce_invariants();
        Ok(events)
    }

    /// Remaining health of the obstacle at `pos` as a fraction of its starting
    /// durability.
    pub fn obstacle_health(&self, pos: Position) -> Option<f32> {
        self.grid.get(pos).and_then(Tile::durability_ratio)
    }

    pub fn obstacle_state(&self, pos: Position) -> Option<ObstacleState> {
        obstacles::obstacle_state(&self.grid, pos)
    }

    /// Pacing hints for an event list, using this engine's animation timing.
    pub fn timeline(&self, events: &[MutationEvent]) -> Vec<TimedEvent> {
        timeline::plan_timeline(events, &self.config.timing)
    }

    /// Fatal in debug builds; release builds log and repair.
    fn enforce_invariants(&mut self) {
        if let Err(err) = self.grid.validate() {
            debug_assert!(false, "{}", err);
            let repaired = self.grid.repair();
            tracing::error!(error = %err, repaired, "grid invariant violated");
        }
    }
}

impl<R: Rng> Engine<R> {
    /// Cheap consistency probe for hosts.
    pub fn validate(&self) -> EngineResult<()> {
        self.grid.validate()
    }

    /// Number of cells still holding an obstacle.
    pub fn obstacles_remaining(&self) -> usize {
        self.grid.obstacle_count()
    }
}
