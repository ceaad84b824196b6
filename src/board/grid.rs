//! Dense cylindrical grid of optional tiles.

use std::fmt;

use super::topology;
use super::types::{Position, Tile, TileKind};
use crate::core::error::{EngineError, EngineResult};

/// Fixed-size `rows x cols` grid. Each cell owns at most one tile.
///
/// Storage indices are never wrapped: callers pass normalized positions and
/// neighbour math goes through [`topology`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a grid by asking `layout` what goes in every cell, row by row.
    pub fn from_layout<F>(rows: usize, cols: usize, obstacle_durability: u32, mut layout: F) -> Self
    where
        F: FnMut(Position) -> TileKind,
    {
        let mut grid = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = Position::new(row, col);
                let index = grid.index(pos);
                grid.cells[index] = Tile::from_kind(layout(pos), pos, obstacle_durability);
            }
        }
        grid
    }

    /// Parse a picture of the grid, one string per row, top row first.
    ///
    /// `.` is empty, `1`-`9` a coloured tile, `O` an obstacle and `B` a bomb.
    /// Whitespace is ignored.
    pub fn from_ascii(picture: &[&str], obstacle_durability: u32) -> EngineResult<Self> {
        let parsed: Vec<Vec<char>> = picture
            .iter()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
            .collect();

        let rows = parsed.len();
        let cols = parsed.first().map_or(0, |r| r.len());
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidConfig("empty grid picture".into()));
        }

        let mut kinds = Vec::with_capacity(rows * cols);
        for (row, line) in parsed.iter().enumerate() {
            if line.len() != cols {
                return Err(EngineError::InvalidConfig(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.len(),
                    cols
                )));
            }
            for &symbol in line {
                let kind = match symbol {
                    '.' => TileKind::Empty,
                    'O' => TileKind::Obstacle,
                    'B' => TileKind::Bomb,
                    '1'..='9' => TileKind::Colored(symbol as u8 - b'0'),
                    other => {
                        return Err(EngineError::InvalidConfig(format!(
                            "unknown cell symbol '{}'",
                            other
                        )))
                    }
                };
                kinds.push(kind);
            }
        }

        Ok(Self::from_layout(rows, cols, obstacle_durability, |pos| {
            kinds[pos.row * cols + pos.col]
        }))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Check that `(row, col)` addresses a stored cell.
    pub fn checked_position(&self, row: usize, col: usize) -> EngineResult<Position> {
        let pos = Position::new(row, col);
        if self.in_bounds(pos) {
            Ok(pos)
        } else {
            Err(EngineError::InvalidPosition { row, col })
        }
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.in_bounds(pos), "position {} out of bounds", pos);
        pos.row * self.cols + pos.col
    }

    /// Tile at `pos`, or `None` for empty and out-of-bounds cells.
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)].as_ref()
    }

    pub(crate) fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.index(pos);
        self.cells[index].as_mut()
    }

    pub fn kind_at(&self, pos: Position) -> TileKind {
        self.get(pos).map_or(TileKind::Empty, Tile::kind)
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Put a fresh tile of `kind` at `pos`, replacing whatever was there.
    /// Returns the replaced tile.
    pub fn place(
        &mut self,
        kind: TileKind,
        pos: Position,
        obstacle_durability: u32,
    ) -> EngineResult<Option<Tile>> {
        let pos = self.checked_position(pos.row, pos.col)?;
        let index = self.index(pos);
        Ok(std::mem::replace(
            &mut self.cells[index],
            Tile::from_kind(kind, pos, obstacle_durability),
        ))
    }

    /// Empty the cell at `pos`, returning its tile.
    pub fn take(&mut self, pos: Position) -> Option<Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.index(pos);
        self.cells[index].take()
    }

    /// Move the tile at `from` into the empty cell `to`, updating the tile's
    /// stored position in the same step.
    pub fn relocate(&mut self, from: Position, to: Position) -> EngineResult<()> {
        if !self.in_bounds(from) {
            return Err(EngineError::InvalidPosition {
                row: from.row,
                col: from.col,
            });
        }
        if !self.in_bounds(to) {
            return Err(EngineError::InvalidPosition {
                row: to.row,
                col: to.col,
            });
        }
        if !self.is_empty_at(to) {
            return Err(EngineError::InconsistentState(format!(
                "cannot move {} onto occupied cell {}",
                from, to
            )));
        }

        let mut tile = self.take(from).ok_or_else(|| {
            EngineError::InconsistentState(format!("no tile to move at {}", from))
        })?;
        tile.set_pos(to);
        let index = self.index(to);
        self.cells[index] = Some(tile);
        Ok(())
    }

    /// Every storage position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Position::new(row, col)))
    }

    /// Every tile on the grid, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        match kind {
            TileKind::Empty => self.cells.iter().filter(|c| c.is_none()).count(),
            _ => self.tiles().filter(|t| t.kind() == kind).count(),
        }
    }

    pub fn obstacle_count(&self) -> usize {
        self.tiles().filter(|t| t.is_obstacle()).count()
    }

    pub fn bomb_count(&self) -> usize {
        self.tiles().filter(|t| t.is_bomb()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.count_kind(TileKind::Empty)
    }

    /// Hex neighbours of `pos` on this grid.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        topology::neighbors(pos, self.rows, self.cols)
    }

    pub fn are_adjacent(&self, a: Position, b: Position) -> bool {
        topology::are_adjacent(a, b, self.rows, self.cols)
    }

    /// Check the grid invariants: every tile's stored position equals its
    /// cell, and no obstacle is left standing at zero durability.
    pub fn validate(&self) -> EngineResult<()> {
        for pos in self.positions() {
            let Some(tile) = self.get(pos) else {
                continue;
            };
            if tile.pos() != pos {
                return Err(EngineError::InconsistentState(format!(
                    "tile in cell {} believes it is at {}",
                    pos,
                    tile.pos()
                )));
            }
            if tile.durability() == Some(0) {
                return Err(EngineError::InconsistentState(format!(
                    "obstacle at {} has no durability left",
                    pos
                )));
            }
        }
        Ok(())
    }

    /// Restore the invariants [`validate`](Self::validate) checks: re-sync
    /// stored positions and clear spent obstacles. Returns the number of
    /// cells touched.
    pub(crate) fn repair(&mut self) -> usize {
        let mut repaired = 0;
        for index in 0..self.cells.len() {
            let pos = Position::new(index / self.cols, index % self.cols);
            let Some(tile) = self.cells[index].as_mut() else {
                continue;
            };
            if tile.pos() != pos {
                tile.set_pos(pos);
                repaired += 1;
            }
            if tile.durability() == Some(0) {
                self.cells[index] = None;
                repaired += 1;
            }
        }
        repaired
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| self.kind_at(Position::new(row, col)).symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
