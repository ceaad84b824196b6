//! Engine behaviour integration tests
//!
//! Drives the public engine API through the core puzzle rules: group search
//! over the wrapped hex topology, minimum match, gravity, obstacles and bomb
//! chains.

use std::collections::HashSet;

use hexfall::board::{are_adjacent, Grid, Position, TileKind};
use hexfall::core::config::EngineConfig;
use hexfall::engine::connectivity::find_match;
use hexfall::engine::resolution::compact;
use hexfall::engine::{Engine, EventSummary, MutationEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn engine_from(picture: &[&str], config: EngineConfig) -> Engine<ChaCha8Rng> {
    let grid = Grid::from_ascii(picture, config.obstacle_durability).unwrap();
    Engine::from_grid(config, grid, ChaCha8Rng::seed_from_u64(42)).unwrap()
}

fn positions(cells: &[(usize, usize)]) -> HashSet<Position> {
    cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
}

const BLOB: [&str; 6] = [
    "2 3 4 2 3 4 2 3",
    "3 1 1 3 4 2 3 4",
    "4 2 1 4 2 3 4 2",
    "2 3 1 1 3 4 2 3",
    "3 4 2 3 4 2 3 4",
    "4 2 3 4 2 3 1 2",
];

// ============================================================================
// Connectivity
// ============================================================================

#[test]
fn test_blob_is_found_from_every_member() {
    let grid = Grid::from_ascii(&BLOB, 3).unwrap();
    let blob = positions(&[(1, 1), (1, 2), (2, 2), (3, 2), (3, 3)]);

    for &start in &blob {
        let found = find_match(&grid, start).unwrap();
        let matched: HashSet<Position> = found.matched.iter().copied().collect();
        assert_eq!(matched, blob, "search from {}", start);
        assert_eq!(found.len(), blob.len());
    }

    // The stray tile of the same colour stays on its own.
    assert_eq!(find_match(&grid, Position::new(5, 6)).unwrap().len(), 1);
}

#[test]
fn test_group_connects_across_the_wrap_seam() {
    let grid = Grid::from_ascii(&["1 2 3 4 2 1", "3 4 2 3 4 3"], 3).unwrap();
    let found = find_match(&grid, Position::new(0, 0)).unwrap();

    let matched: HashSet<Position> = found.matched.iter().copied().collect();
    assert_eq!(matched, positions(&[(0, 0), (0, 5)]));
}

#[test]
fn test_rows_never_wrap() {
    assert!(!are_adjacent(Position::new(0, 0), Position::new(5, 0), 6, 20));
    assert!(!are_adjacent(Position::new(0, 3), Position::new(5, 3), 6, 20));

    let grid = Grid::from_ascii(&["1 2", "2 3", "1 3"], 3).unwrap();
    assert_eq!(find_match(&grid, Position::new(0, 0)).unwrap().len(), 1);
}

#[test]
fn test_group_search_leaves_grid_untouched() {
    let grid = Grid::from_ascii(&BLOB, 3).unwrap();
    let before = grid.clone();
    find_match(&grid, Position::new(1, 1));
    assert_eq!(grid, before);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_small_group_is_a_noop() {
    let config = EngineConfig {
        minimum_match_count: 6,
        ..EngineConfig::with_size(6, 8)
    };
    let mut engine = engine_from(&BLOB, config);
    let before = engine.grid().clone();

    let events = engine.activate_cell(1, 1).unwrap();

    assert!(events.is_empty());
    assert_eq!(engine.grid(), &before);
}

#[test]
fn test_group_at_minimum_resolves() {
    let config = EngineConfig {
        minimum_match_count: 5,
        bomb_spawn_threshold: 6,
        ..EngineConfig::with_size(6, 8)
    };
    let mut engine = engine_from(&BLOB, config);

    let events = engine.activate_cell(3, 3).unwrap();
    let summary = EventSummary::from_events(&events);

    assert_eq!(summary.destroyed, 5);
    assert_eq!(summary.spawned_bombs, 0);
    assert_eq!(summary.spawned_colored, 5);
    assert_eq!(engine.grid().empty_count(), 0);
}

#[test]
fn test_gravity_is_idempotent() {
    let mut grid = Grid::from_ascii(&["1 .", ". 2", "3 .", ". 4"], 3).unwrap();

    let first = compact(&mut grid).unwrap();
    let second = compact(&mut grid).unwrap();

    assert!(!first.events.is_empty());
    assert!(second.events.is_empty());
    assert_eq!(first.spawn_counts, second.spawn_counts);
    assert_eq!(first.spawn_counts, vec![2, 2]);
}

#[test]
fn test_obstacle_is_a_floor() {
    let mut grid = Grid::from_ascii(&["1 3", ". 4", "O 3", "2 4"], 3).unwrap();

    let compaction = compact(&mut grid).unwrap();

    assert_eq!(
        compaction.events,
        vec![MutationEvent::Moved {
            from: Position::new(0, 0),
            to: Position::new(1, 0),
        }]
    );
    assert_eq!(grid.kind_at(Position::new(1, 0)), TileKind::Colored(1));
    assert_eq!(grid.kind_at(Position::new(2, 0)), TileKind::Obstacle);
    assert_eq!(grid.kind_at(Position::new(3, 0)), TileKind::Colored(2));
    assert_eq!(compaction.spawn_counts, vec![1, 0]);
}

#[test]
fn test_two_touching_tiles_break_a_two_durability_obstacle() {
    let config = EngineConfig {
        minimum_match_count: 2,
        bomb_spawn_threshold: 10,
        obstacle_durability: 2,
        ..EngineConfig::with_size(3, 4)
    };
    let mut engine = engine_from(&["2 1 3 4", "1 O 3 4", "2 2 3 4"], config);

    let events = engine.activate_cell(0, 1).unwrap();

    assert!(events.contains(&MutationEvent::ObstacleDamaged {
        pos: Position::new(1, 1),
        remaining: 0,
        max_durability: 2,
    }));
    assert!(events.contains(&MutationEvent::Destroyed {
        pos: Position::new(1, 1),
        kind: TileKind::Obstacle,
    }));
    assert_eq!(engine.obstacles_remaining(), 0);
    assert!(engine.validate().is_ok());
}

// ============================================================================
// Bomb chains
// ============================================================================

#[test]
fn test_bomb_triangle_explodes_each_bomb_once() {
    // (2, 2) sits in an even column: (2, 3) is its right and (1, 3) its
    // up-right neighbour; (1, 3) is directly above (2, 3).
    let mut engine = engine_from(
        &[
            "1 2 3 4 1 2",
            "2 3 4 B 2 3",
            "3 4 B B 3 4",
            "4 1 2 3 4 1",
        ],
        EngineConfig::with_size(4, 6),
    );

    let events = engine.activate_cell(2, 2).unwrap();

    let exploded: Vec<Position> = events
        .iter()
        .filter(|e| e.is_exploded())
        .map(|e| e.pos())
        .collect();
    assert_eq!(exploded.len(), 3);
    assert_eq!(
        exploded.iter().copied().collect::<HashSet<_>>(),
        positions(&[(2, 2), (2, 3), (1, 3)])
    );
    assert_eq!(engine.grid().bomb_count(), 0);
    assert_eq!(engine.grid().empty_count(), 0);
}

#[test]
fn test_out_of_bounds_activation_is_rejected() {
    let mut engine = engine_from(&BLOB, EngineConfig::with_size(6, 8));
    assert!(engine.activate_cell(6, 0).is_err());
    assert!(engine.activate_cell(0, 8).is_err());
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_single_colour_board_clears_and_refills() {
    let config = EngineConfig::default();
    let mut engine = Engine::with_layout(config, ChaCha8Rng::seed_from_u64(7), |_| {
        TileKind::Colored(1)
    })
    .unwrap();

    let found = engine.find_match(Position::new(0, 0)).unwrap();
    assert_eq!(found.len(), 120);

    let events = engine.activate_cell(0, 0).unwrap();

    let destroyed = events.iter().filter(|e| e.is_destroyed()).count();
    assert_eq!(destroyed, 120);

    // The bomb left at the origin falls to the bottom of its column.
    assert!(events.contains(&MutationEvent::Spawned {
        kind: TileKind::Bomb,
        pos: Position::new(0, 0),
    }));
    assert!(events.contains(&MutationEvent::Moved {
        from: Position::new(0, 0),
        to: Position::new(5, 0),
    }));
    assert_eq!(engine.grid().kind_at(Position::new(5, 0)), TileKind::Bomb);

    let refills: Vec<Position> = events
        .iter()
        .filter_map(|e| match e {
            MutationEvent::Spawned {
                kind: TileKind::Colored(color),
                pos,
            } => {
                assert!((1..=4).contains(color));
                Some(*pos)
            }
            _ => None,
        })
        .collect();
    assert_eq!(refills.len(), 119);
    let columns: HashSet<usize> = refills.iter().map(|p| p.col).collect();
    assert_eq!(columns.len(), 20);

    assert_eq!(engine.grid().empty_count(), 0);
    assert!(engine.validate().is_ok());
}
