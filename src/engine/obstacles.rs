//! Obstacle durability.
//!
//! An obstacle is `Healthy` until its durability reaches zero, at which point
//! it is removed from the grid. There is no way back.

use serde::Serialize;

use super::events::MutationEvent;
use crate::board::{Grid, Position, Tile, TileKind};

/// Observable state of an obstacle cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObstacleState {
    Healthy { durability: u32, max_durability: u32 },
    Destroyed,
}

/// State of the obstacle at `pos`, or `None` if the cell holds something else.
/// An empty cell reads as `Destroyed`.
pub fn obstacle_state(grid: &Grid, pos: Position) -> Option<ObstacleState> {
    match grid.get(pos) {
        Some(Tile::Obstacle {
            durability,
            max_durability,
            ..
        }) if *durability > 0 => Some(ObstacleState::Healthy {
            durability: *durability,
            max_durability: *max_durability,
        }),
        Some(Tile::Obstacle { .. }) | None => Some(ObstacleState::Destroyed),
        Some(_) => None,
    }
}

/// Deal `damage` to the obstacle at `pos`. Emits `ObstacleDamaged`, and
/// `Destroyed` after clearing the cell if durability ran out. Anything other
/// than an obstacle at `pos` is left alone.
pub(crate) fn damage_obstacle(
    grid: &mut Grid,
    pos: Position,
    damage: u32,
    events: &mut Vec<MutationEvent>,
) {
    if damage == 0 {
        return;
    }
    let Some(tile) = grid.get_mut(pos) else {
        return;
    };
    let Tile::Obstacle { max_durability, .. } = *tile else {
        return;
    };
    let Some(remaining) = tile.apply_damage(damage) else {
        return;
    };

    tracing::trace!(pos = %pos, damage, remaining, "obstacle hit");
    events.push(MutationEvent::ObstacleDamaged {
        pos,
        remaining,
        max_durability,
    });

    if remaining == 0 {
        grid.take(pos);
        events.push(MutationEvent::Destroyed {
            pos,
            kind: TileKind::Obstacle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_keeps_healthy_obstacle() {
        let mut grid = Grid::from_ascii(&["O1"], 3).unwrap();
        let mut events = Vec::new();
        damage_obstacle(&mut grid, Position::new(0, 0), 1, &mut events);

        assert_eq!(
            obstacle_state(&grid, Position::new(0, 0)),
            Some(ObstacleState::Healthy {
                durability: 2,
                max_durability: 3
            })
        );
        assert_eq!(
            events,
            vec![MutationEvent::ObstacleDamaged {
                pos: Position::new(0, 0),
                remaining: 2,
                max_durability: 3
            }]
        );
    }

    #[test]
    fn test_overkill_destroys_and_clears_cell() {
        let mut grid = Grid::from_ascii(&["O1"], 2).unwrap();
        let mut events = Vec::new();
        damage_obstacle(&mut grid, Position::new(0, 0), 5, &mut events);

        assert!(grid.is_empty_at(Position::new(0, 0)));
        assert_eq!(
            obstacle_state(&grid, Position::new(0, 0)),
            Some(ObstacleState::Destroyed)
        );
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            MutationEvent::Destroyed {
                pos: Position::new(0, 0),
                kind: TileKind::Obstacle
            }
        );
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_non_obstacles_untouched() {
        let mut grid = Grid::from_ascii(&["O1"], 2).unwrap();
        let before = grid.clone();
        let mut events = Vec::new();
        damage_obstacle(&mut grid, Position::new(0, 1), 3, &mut events);
        damage_obstacle(&mut grid, Position::new(0, 0), 0, &mut events);
        assert!(events.is_empty());
        assert_eq!(grid, before);
        assert_eq!(obstacle_state(&grid, Position::new(0, 1)), None);
    }
}
