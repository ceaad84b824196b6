//! Match resolution, gravity and refill.

use rand::Rng;

use super::connectivity::MatchResult;
use super::events::MutationEvent;
use super::obstacles::damage_obstacle;
use crate::board::{Grid, Position, TileKind};
use crate::core::config::EngineConfig;
use crate::core::error::EngineResult;

/// Outcome of a gravity pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compaction {
    /// `Moved` events, column by column, bottom-up within each column.
    pub events: Vec<MutationEvent>,
    /// Number of empty cells left at the top of each column, indexed by column.
    pub spawn_counts: Vec<usize>,
}

impl Compaction {
    pub fn total_spawns(&self) -> usize {
        self.spawn_counts.iter().sum()
    }
}

/// Apply a found group to the grid.
///
/// Groups smaller than `minimum_match_count` are a no-op. Otherwise every
/// matched tile is cleared, a bomb is left at the origin when the group reaches
/// `bomb_spawn_threshold`, each bordering obstacle loses one durability per
/// matched tile touching it, and the grid is settled.
pub fn resolve_match<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &EngineConfig,
    found: &MatchResult,
    rng: &mut R,
) -> EngineResult<Vec<MutationEvent>> {
    if found.len() < config.minimum_match_count {
        tracing::debug!(
            origin = %found.origin,
            size = found.len(),
            minimum = config.minimum_match_count,
            "group too small to resolve"
        );
        return Ok(Vec::new());
    }

    let mut events = Vec::with_capacity(found.len() * 3);

    for &pos in &found.matched {
        if let Some(tile) = grid.take(pos) {
            events.push(MutationEvent::Destroyed {
                pos,
                kind: tile.kind(),
            });
        }
    }

    // Placed after clearing so the bomb survives its own match.
    if found.len() >= config.bomb_spawn_threshold && found.contains(found.origin) {
        grid.place(TileKind::Bomb, found.origin, config.obstacle_durability)?;
        events.push(MutationEvent::Spawned {
            kind: TileKind::Bomb,
            pos: found.origin,
        });
    }

    for &obstacle in &found.adjacent_obstacles {
        let hits = found
            .matched
            .iter()
            .filter(|&&pos| grid.are_adjacent(obstacle, pos))
            .count() as u32;
        damage_obstacle(grid, obstacle, hits, &mut events);
    }

    tracing::debug!(
        origin = %found.origin,
        color = found.color,
        size = found.len(),
        obstacles = found.adjacent_obstacles.len(),
        "group resolved"
    );

    events.extend(settle(grid, config, rng)?);
    Ok(events)
}

/// Gravity followed by refill. Shared by match resolution and bomb chains.
pub fn settle<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &EngineConfig,
    rng: &mut R,
) -> EngineResult<Vec<MutationEvent>> {
    let compaction = compact(grid)?;
    let mut events = compaction.events;
    events.extend(refill(grid, config, &compaction.spawn_counts, rng)?);
    Ok(events)
}

/// Let tiles fall into the gaps below them.
///
/// Each column is scanned bottom-up with a running gap count. Empty cells grow
/// the gap, an obstacle resets it (obstacles are floors), and any other tile is
/// moved down by the current gap. The gap left after the top row is the
/// column's refill count.
pub fn compact(grid: &mut Grid) -> EngineResult<Compaction> {
    let mut compaction = Compaction {
        events: Vec::new(),
        spawn_counts: Vec::with_capacity(grid.cols()),
    };

    for col in 0..grid.cols() {
        let mut gap = 0;
        for row in (0..grid.rows()).rev() {
            let pos = Position::new(row, col);
            match grid.get(pos) {
                None => gap += 1,
                Some(tile) if !tile.can_fall() => gap = 0,
                Some(_) if gap > 0 => {
                    let to = Position::new(row + gap, col);
                    grid.relocate(pos, to)?;
                    compaction
                        .events
                        .push(MutationEvent::Moved { from: pos, to });
                }
                Some(_) => {}
            }
        }
        compaction.spawn_counts.push(gap);
    }

    Ok(compaction)
}

/// Spawn `spawn_counts[col]` random coloured tiles into each column.
///
/// Every new tile goes to the lowest empty cell above the column's topmost
/// obstacle, or the lowest empty cell of the column when it has no obstacle.
pub fn refill<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &EngineConfig,
    spawn_counts: &[usize],
    rng: &mut R,
) -> EngineResult<Vec<MutationEvent>> {
    let mut events = Vec::with_capacity(spawn_counts.iter().sum());

    for (col, &count) in spawn_counts.iter().enumerate() {
        for _ in 0..count {
            let Some(row) = refill_row(grid, col) else {
                tracing::warn!(col, "no empty cell to refill");
                break;
            };
            let pos = Position::new(row, col);
            let color = rng.gen_range(1..=config.color_type_count);
            grid.place(TileKind::Colored(color), pos, config.obstacle_durability)?;
            events.push(MutationEvent::Spawned {
                kind: TileKind::Colored(color),
                pos,
            });
        }
    }

    if !events.is_empty() {
        tracing::trace!(spawned = events.len(), "refill finished");
    }
    Ok(events)
}

/// Row a new tile dropped into `col` comes to rest on.
fn refill_row(grid: &Grid, col: usize) -> Option<usize> {
    let mut lowest_empty = None;

    for row in 0..grid.rows() {
        match grid.get(Position::new(row, col)) {
            Some(tile) if tile.is_obstacle() => return lowest_empty,
            None => lowest_empty = Some(row),
            Some(_) => {}
        }
    }

    (0..grid.rows())
        .rev()
        .find(|&row| grid.is_empty_at(Position::new(row, col)))
}
