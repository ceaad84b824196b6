//! Bomb detonation and chain reactions.

use std::collections::{HashSet, VecDeque};

use rand::Rng;

use super::events::MutationEvent;
use super::obstacles::damage_obstacle;
use super::resolution::settle;
use crate::board::{Grid, Position, Tile};
use crate::core::config::EngineConfig;
use crate::core::error::EngineResult;

/// Detonate the bomb at `origin` and every bomb it reaches, then settle.
///
/// Bombs are processed breadth-first from a worklist. Each detonation destroys
/// the coloured neighbours, deals `bomb_damage` to each neighbouring obstacle,
/// queues neighbouring bombs and finally clears its own cell. A processed set
/// makes every bomb go off exactly once, even when bombs neighbour each other
/// in cycles. Does nothing if `origin` holds no bomb.
pub fn activate_bomb<R: Rng + ?Sized>(
    grid: &mut Grid,
    config: &EngineConfig,
    origin: Position,
    rng: &mut R,
) -> EngineResult<Vec<MutationEvent>> {
    if !grid.get(origin).is_some_and(Tile::is_bomb) {
        return Ok(Vec::new());
    }

    let mut events = Vec::new();
    let mut queue: VecDeque<Position> = VecDeque::from([origin]);
    let mut processed: HashSet<Position> = HashSet::new();

    while let Some(bomb) = queue.pop_front() {
        if !processed.insert(bomb) {
            continue;
        }

        let mut obstacles_hit = Vec::new();
        for neighbor in grid.neighbors(bomb) {
            match grid.get(neighbor) {
                Some(Tile::Colored { .. }) => {
                    if let Some(tile) = grid.take(neighbor) {
                        events.push(MutationEvent::Destroyed {
                            pos: neighbor,
                            kind: tile.kind(),
                        });
                    }
                }
                Some(Tile::Obstacle { .. }) => obstacles_hit.push(neighbor),
                // Left standing: it clears its own neighbourhood on its turn.
                Some(Tile::Bomb { .. }) => {
                    if !processed.contains(&neighbor) {
                        queue.push_back(neighbor);
                    }
                }
                None => {}
            }
        }

        for obstacle in obstacles_hit {
            damage_obstacle(grid, obstacle, config.bomb_damage, &mut events);
        }

        events.push(MutationEvent::Exploded { pos: bomb });
        grid.take(bomb);
        tracing::trace!(pos = %bomb, queued = queue.len(), "bomb exploded");
    }

    tracing::debug!(
        origin = %origin,
        detonations = processed.len(),
        "bomb chain finished"
    );

    events.extend(settle(grid, config, rng)?);
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(rows: usize, cols: usize) -> EngineConfig {
        EngineConfig::with_size(rows, cols)
    }

    #[test]
    fn test_lone_bomb_clears_neighborhood() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut grid = Grid::from_ascii(&["1 2 3 4", "2 B 4 1", "3 4 1 2"], 2).unwrap();
        let events = activate_bomb(&mut grid, &config(3, 4), Position::new(1, 1), &mut rng).unwrap();

        // Odd column: up, left, right, down, down-left, down-right.
        let destroyed: Vec<Position> = events
            .iter()
            .filter_map(|e| match e {
                MutationEvent::Destroyed { pos, .. } => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(destroyed.len(), 6);
        for pos in [(0, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)] {
            assert!(destroyed.contains(&Position::new(pos.0, pos.1)));
        }
        assert_eq!(events.iter().filter(|e| e.is_exploded()).count(), 1);
        assert_eq!(grid.empty_count(), 0);
        assert_eq!(grid.bomb_count(), 0);
    }

    #[test]
    fn test_non_bomb_origin_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut grid = Grid::from_ascii(&["1 2", "O ."], 2).unwrap();
        let before = grid.clone();
        for pos in [(0, 0), (1, 0), (1, 1)] {
            let events =
                activate_bomb(&mut grid, &config(2, 2), Position::new(pos.0, pos.1), &mut rng)
                    .unwrap();
            assert!(events.is_empty());
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_bomb_damage_is_flat_per_bomb() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut cfg = config(3, 4);
        cfg.bomb_damage = 2;
        let mut grid = Grid::from_ascii(&["1 1 1 1", "1 B O 1", "1 1 1 1"], 5).unwrap();
        let events = activate_bomb(&mut grid, &cfg, Position::new(1, 1), &mut rng).unwrap();

        assert!(events.contains(&MutationEvent::ObstacleDamaged {
            pos: Position::new(1, 2),
            remaining: 3,
            max_durability: 5
        }));
        assert_eq!(grid.kind_at(Position::new(1, 2)), TileKind::Obstacle);
    }

    #[test]
    fn test_chained_bombs_each_hit_shared_obstacle() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut cfg = config(3, 4);
        cfg.bomb_damage = 1;
        // Both bombs neighbour each other and the obstacle at (1, 2).
        let mut grid = Grid::from_ascii(&["1 1 1 1", "1 B O 1", "1 1 B 1"], 2).unwrap();
        let events = activate_bomb(&mut grid, &cfg, Position::new(1, 1), &mut rng).unwrap();

        assert_eq!(events.iter().filter(|e| e.is_exploded()).count(), 2);
        assert!(events.contains(&MutationEvent::Destroyed {
            pos: Position::new(1, 2),
            kind: TileKind::Obstacle
        }));
        assert_eq!(grid.bomb_count(), 0);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_no_cell_destroyed_twice() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut grid = Grid::from_ascii(&["1 B 1 1", "B 1 B 1", "1 B 1 1"], 2).unwrap();
        let events = activate_bomb(&mut grid, &config(3, 4), Position::new(1, 0), &mut rng).unwrap();

        let mut destroyed: Vec<Position> = events
            .iter()
            .filter(|e| e.is_destroyed() || e.is_exploded())
            .map(|e| e.pos())
            .collect();
        let total = destroyed.len();
        destroyed.sort();
        destroyed.dedup();
        assert_eq!(destroyed.len(), total);
        // (2, 1) touches none of the other bombs and stays armed.
        assert_eq!(events.iter().filter(|e| e.is_exploded()).count(), 3);
        assert_eq!(grid.bomb_count(), 1);
    }
}
