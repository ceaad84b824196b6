//! Tile and coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Colour of a matchable tile, in `1..=color_type_count`.
pub type ColorType = u8;

/// A storage coordinate on the grid. Always normalized: `row < rows`,
/// `col < cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Describes what a cell holds, without identity or position.
///
/// Used by level layouts to seed the grid and by events to tell the host what
/// appeared or vanished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Colored(ColorType),
    Obstacle,
    Bomb,
}

impl TileKind {
    pub fn symbol(&self) -> char {
        match self {
            TileKind::Empty => '.',
            TileKind::Colored(color) => char::from_digit(u32::from(*color), 36).unwrap_or('?'),
            TileKind::Obstacle => 'O',
            TileKind::Bomb => 'B',
        }
    }
}

/// A tile occupying exactly one grid cell. `pos` must always equal the cell
/// that owns the tile; only [`Grid`](super::Grid) moves tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Colored {
        color: ColorType,
        pos: Position,
    },
    Obstacle {
        durability: u32,
        max_durability: u32,
        pos: Position,
    },
    Bomb {
        pos: Position,
    },
}

impl Tile {
    pub fn colored(color: ColorType, pos: Position) -> Self {
        Tile::Colored { color, pos }
    }

    pub fn obstacle(durability: u32, pos: Position) -> Self {
        Tile::Obstacle {
            durability,
            max_durability: durability,
            pos,
        }
    }

    pub fn bomb(pos: Position) -> Self {
        Tile::Bomb { pos }
    }

    /// Build a tile for a layout kind. Returns `None` for [`TileKind::Empty`].
    pub fn from_kind(kind: TileKind, pos: Position, obstacle_durability: u32) -> Option<Self> {
        match kind {
            TileKind::Empty => None,
            TileKind::Colored(color) => Some(Tile::colored(color, pos)),
            TileKind::Obstacle => Some(Tile::obstacle(obstacle_durability, pos)),
            TileKind::Bomb => Some(Tile::bomb(pos)),
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            Tile::Colored { pos, .. } | Tile::Obstacle { pos, .. } | Tile::Bomb { pos } => *pos,
        }
    }

    pub(crate) fn set_pos(&mut self, new_pos: Position) {
        match self {
            Tile::Colored { pos, .. } | Tile::Obstacle { pos, .. } | Tile::Bomb { pos } => {
                *pos = new_pos
            }
        }
    }

    pub fn kind(&self) -> TileKind {
        match self {
            Tile::Colored { color, .. } => TileKind::Colored(*color),
            Tile::Obstacle { .. } => TileKind::Obstacle,
            Tile::Bomb { .. } => TileKind::Bomb,
        }
    }

    pub fn color(&self) -> Option<ColorType> {
        match self {
            Tile::Colored { color, .. } => Some(*color),
            _ => None,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, Tile::Obstacle { .. })
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, Tile::Bomb { .. })
    }

    /// Tiles that fall under gravity. Obstacles never move.
    pub fn can_fall(&self) -> bool {
        !self.is_obstacle()
    }

    pub fn durability(&self) -> Option<u32> {
        match self {
            Tile::Obstacle { durability, .. } => Some(*durability),
            _ => None,
        }
    }

    /// Remaining health as a fraction of the starting durability, for hosts
    /// that tint damaged obstacles.
    pub fn durability_ratio(&self) -> Option<f32> {
        match self {
            Tile::Obstacle {
                durability,
                max_durability,
                ..
            } if *max_durability > 0 => Some(*durability as f32 / *max_durability as f32),
            Tile::Obstacle { .. } => Some(0.0),
            _ => None,
        }
    }

    /// Reduce an obstacle's durability, clamping at zero. Returns the remaining
    /// durability, or `None` if the tile is not an obstacle.
    pub fn apply_damage(&mut self, damage: u32) -> Option<u32> {
        match self {
            Tile::Obstacle { durability, .. } => {
                *durability = durability.saturating_sub(damage);
                Some(*durability)
            }
            _ => None,
        }
    }
}
