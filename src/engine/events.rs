//! Mutation events emitted by the engine.
//!
//! The logical grid is already updated when an event is emitted. Hosts replay
//! the list in order to animate the transition.

use serde::{Deserialize, Serialize};

use crate::board::{Position, TileKind};

/// A single grid mutation, in the order it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationEvent {
    /// A tile was removed from `pos`. `kind` is what the cell held.
    Destroyed { pos: Position, kind: TileKind },

    /// A tile fell from `from` to `to` (same column).
    Moved { from: Position, to: Position },

    /// A new tile appeared at `pos`: a bomb left by a large match, or a
    /// coloured refill tile.
    Spawned { kind: TileKind, pos: Position },

    /// The bomb at `pos` detonated and left its cell.
    Exploded { pos: Position },

    /// The obstacle at `pos` took damage. A `remaining` of zero is followed by
    /// a `Destroyed` event for the same cell.
    ObstacleDamaged {
        pos: Position,
        remaining: u32,
        max_durability: u32,
    },
}

impl MutationEvent {
    /// The cell this event lands on.
    pub fn pos(&self) -> Position {
        match self {
            MutationEvent::Destroyed { pos, .. }
            | MutationEvent::Spawned { pos, .. }
            | MutationEvent::Exploded { pos }
            | MutationEvent::ObstacleDamaged { pos, .. } => *pos,
            MutationEvent::Moved { to, .. } => *to,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self, MutationEvent::Destroyed { .. })
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, MutationEvent::Moved { .. })
    }

    pub fn is_spawned(&self) -> bool {
        matches!(self, MutationEvent::Spawned { .. })
    }

    pub fn is_exploded(&self) -> bool {
        matches!(self, MutationEvent::Exploded { .. })
    }
}

/// Per-kind tally of an event list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub destroyed: usize,
    pub obstacles_destroyed: usize,
    pub moved: usize,
    pub spawned_colored: usize,
    pub spawned_bombs: usize,
    pub exploded: usize,
    pub obstacle_hits: usize,
}

impl EventSummary {
    pub fn from_events(events: &[MutationEvent]) -> Self {
        let mut summary = Self::default();
        for event in events {
            match event {
                MutationEvent::Destroyed { kind, .. } => {
                    summary.destroyed += 1;
                    if *kind == TileKind::Obstacle {
                        summary.obstacles_destroyed += 1;
                    }
                }
                MutationEvent::Moved { .. } => summary.moved += 1,
                MutationEvent::Spawned { kind, .. } => match kind {
                    TileKind::Bomb => summary.spawned_bombs += 1,
                    _ => summary.spawned_colored += 1,
                },
                MutationEvent::Exploded { .. } => summary.exploded += 1,
                MutationEvent::ObstacleDamaged { .. } => summary.obstacle_hits += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_pos() {
        let moved = MutationEvent::Moved {
            from: Position::new(0, 1),
            to: Position::new(3, 1),
        };
        assert_eq!(moved.pos(), Position::new(3, 1));
        assert!(moved.is_moved());
        assert!(!moved.is_spawned());
    }

    #[test]
    fn test_summary_counts() {
        let events = [
            MutationEvent::Destroyed {
                pos: Position::new(0, 0),
                kind: TileKind::Colored(1),
            },
            MutationEvent::ObstacleDamaged {
                pos: Position::new(1, 0),
                remaining: 0,
                max_durability: 1,
            },
            MutationEvent::Destroyed {
                pos: Position::new(1, 0),
                kind: TileKind::Obstacle,
            },
            MutationEvent::Spawned {
                kind: TileKind::Bomb,
                pos: Position::new(0, 0),
            },
            MutationEvent::Spawned {
                kind: TileKind::Colored(2),
                pos: Position::new(0, 1),
            },
            MutationEvent::Exploded {
                pos: Position::new(2, 2),
            },
        ];
        let summary = EventSummary::from_events(&events);
        assert_eq!(summary.destroyed, 2);
        assert_eq!(summary.obstacles_destroyed, 1);
        assert_eq!(summary.obstacle_hits, 1);
        assert_eq!(summary.spawned_bombs, 1);
        assert_eq!(summary.spawned_colored, 1);
        assert_eq!(summary.exploded, 1);
        assert_eq!(summary.moved, 0);
    }

    #[test]
    fn test_events_serialize_tagged() {
        let event = MutationEvent::Exploded {
            pos: Position::new(1, 2),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"exploded","pos":{"row":1,"col":2}}"#);
    }
}
