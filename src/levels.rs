//! Built-in level layouts.
//!
//! A layout decides what each cell holds when a level starts. The engine only
//! consumes the resulting grid; hosts can supply their own layout through
//! [`LevelLayout`] or a plain closure (see [`Engine::with_layout`]).
//!
//! [`Engine::with_layout`]: crate::engine::Engine::with_layout

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{topology, Grid, Position, TileKind};
use crate::core::config::EngineConfig;
use crate::core::constants::*;

/// Strategy that maps a cell to its starting tile.
pub trait LevelLayout {
    /// Starting tile for `pos` on a `rows x cols` grid.
    fn tile_at<R: Rng + ?Sized>(
        &self,
        pos: Position,
        rows: usize,
        cols: usize,
        color_type_count: u8,
        rng: &mut R,
    ) -> TileKind;

    /// Build a full grid for `config`.
    fn build_grid<R: Rng + ?Sized>(&self, config: &EngineConfig, rng: &mut R) -> Grid {
        let (rows, cols) = (config.rows, config.cols);
        Grid::from_layout(rows, cols, config.obstacle_durability, |pos| {
            self.tile_at(pos, rows, cols, config.color_type_count, &mut *rng)
        })
    }
}

/// The shipped levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    /// Random colours everywhere.
    #[default]
    Classic,
    /// A full ring of obstacles on one row.
    ObstacleBand,
    /// A handful of scattered obstacles.
    IslandMaze,
    /// A bomb column flanked by obstacle walls and alternating coloured lanes.
    BombGrid,
    /// Bombs on a lattice, each walled in by obstacles.
    BombChambers,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Classic,
        Level::ObstacleBand,
        Level::IslandMaze,
        Level::BombGrid,
        Level::BombChambers,
    ];

    /// Level for a numeric id. Unknown ids fall back to `Classic`.
    pub fn from_id(id: u32) -> Self {
        match id {
            LEVEL_OBSTACLE_BAND => Level::ObstacleBand,
            LEVEL_ISLAND_MAZE => Level::IslandMaze,
            LEVEL_BOMB_GRID => Level::BombGrid,
            LEVEL_BOMB_CHAMBERS => Level::BombChambers,
            _ => Level::Classic,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Level::Classic => LEVEL_CLASSIC,
            Level::ObstacleBand => LEVEL_OBSTACLE_BAND,
            Level::IslandMaze => LEVEL_ISLAND_MAZE,
            Level::BombGrid => LEVEL_BOMB_GRID,
            Level::BombChambers => LEVEL_BOMB_CHAMBERS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Classic => "Classic",
            Level::ObstacleBand => "Obstacle Band",
            Level::IslandMaze => "Island Maze",
            Level::BombGrid => "Bomb Grid",
            Level::BombChambers => "Bomb Chambers",
        }
    }

    /// Next level in [`Level::ALL`], wrapping around.
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous level in [`Level::ALL`], wrapping around.
    pub fn previous(&self) -> Self {
        let index = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl LevelLayout for Level {
    fn tile_at<R: Rng + ?Sized>(
        &self,
        pos: Position,
        rows: usize,
        cols: usize,
        color_type_count: u8,
        rng: &mut R,
    ) -> TileKind {
        let fixed = match self {
            Level::Classic => None,
            Level::ObstacleBand => (pos.row == OBSTACLE_BAND_ROW).then_some(TileKind::Obstacle),
            Level::IslandMaze => ISLAND_MAZE_OBSTACLES
                .contains(&(pos.row, pos.col))
                .then_some(TileKind::Obstacle),
            Level::BombGrid => bomb_grid_tile(pos, cols),
            Level::BombChambers => bomb_chambers_tile(pos, rows, cols),
        };

        fixed.unwrap_or_else(|| random_color(color_type_count, rng))
    }
}

fn random_color<R: Rng + ?Sized>(color_type_count: u8, rng: &mut R) -> TileKind {
    TileKind::Colored(rng.gen_range(1..=color_type_count))
}

/// Column 0 is all bombs. Column 1 and the last column are obstacle walls,
/// then every third column is a wall; walls leave row 0 open.
fn bomb_grid_tile(pos: Position, cols: usize) -> Option<TileKind> {
    let Position { row, col } = pos;
    if col == 0 {
        return Some(TileKind::Bomb);
    }
    let is_wall = col == 1
        || col == cols - 1
        || !((col - 1) % 3 == 0 || (col - 2) % 3 == 0);
    (is_wall && row != 0).then_some(TileKind::Obstacle)
}

fn is_chamber_bomb(pos: Position) -> bool {
    pos.row % 3 == 0 && pos.col % 3 == 0
}

/// Bombs on every third row and column; every cell touching a bomb is an
/// obstacle.
fn bomb_chambers_tile(pos: Position, rows: usize, cols: usize) -> Option<TileKind> {
    if is_chamber_bomb(pos) {
        return Some(TileKind::Bomb);
    }
    topology::neighbors(pos, rows, cols)
        .into_iter()
        .any(is_chamber_bomb)
        .then_some(TileKind::Obstacle)
}
