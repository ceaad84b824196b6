//! Same-colour group search.

use std::collections::{HashSet, VecDeque};

use crate::board::{ColorType, Grid, Position, Tile};

/// Snapshot of a connected same-colour group and the obstacles touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The activated cell.
    pub origin: Position,
    /// Colour shared by every matched tile.
    pub color: ColorType,
    /// Matched cells in discovery order, origin first.
    pub matched: Vec<Position>,
    /// Obstacles directly next to the group, each listed once.
    pub adjacent_obstacles: Vec<Position>,
}

impl MatchResult {
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.matched.contains(&pos)
    }
}

/// Breadth-first search for the group of tiles sharing the colour at `origin`.
///
/// Returns `None` if `origin` does not hold a coloured tile. Obstacles met at
/// the group's border are recorded and never traversed; bombs, empty cells and
/// other colours are ignored. Each cell is visited at most once. The grid is
/// not modified.
pub fn find_match(grid: &Grid, origin: Position) -> Option<MatchResult> {
    let color = grid.get(origin)?.color()?;

    let mut matched = Vec::new();
    let mut adjacent_obstacles = Vec::new();
    let mut visited: HashSet<Position> = HashSet::new();
    let mut queue: VecDeque<Position> = VecDeque::from([origin]);

    while let Some(pos) = queue.pop_front() {
        if !visited.insert(pos) {
            continue;
        }

        match grid.get(pos) {
            Some(Tile::Obstacle { .. }) => adjacent_obstacles.push(pos),
            Some(Tile::Colored { color: c, .. }) if *c == color => {
                matched.push(pos);
                for neighbor in grid.neighbors(pos) {
                    if !visited.contains(&neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
            _ => {}
        }
    }

    tracing::trace!(
        origin = %origin,
        color,
        matched = matched.len(),
        obstacles = adjacent_obstacles.len(),
        "group search finished"
    );

    Some(MatchResult {
        origin,
        color,
        matched,
        adjacent_obstacles,
    })
}
