//! Simulator integration tests

use hexfall::core::config::EngineConfig;
use hexfall::levels::Level;
use hexfall::simulator::{run_simulation, MoveStrategy, SimConfig};

fn config(level: Level, strategy: MoveStrategy) -> SimConfig {
    SimConfig {
        num_runs: 4,
        moves_per_run: 40,
        seed: Some(1234),
        level,
        strategy,
        engine: EngineConfig::casual(),
        verbosity: 0,
    }
}

#[test]
fn test_report_covers_every_run() {
    let report = run_simulation(&config(Level::IslandMaze, MoveStrategy::Random)).unwrap();
    assert_eq!(report.num_runs, 4);
    assert_eq!(report.run_stats.len(), 4);
    for run in &report.run_stats {
        assert_eq!(run.activations, 40);
        assert_eq!(run.obstacles_at_start, 8);
        assert!(run.obstacles_remaining <= run.obstacles_at_start);
        assert!(run.obstacles_destroyed <= 8);
    }
}

#[test]
fn test_greedy_play_clears_tiles_on_casual_rules() {
    let report = run_simulation(&config(Level::Classic, MoveStrategy::Greedy)).unwrap();
    assert!(report.avg_matches > 0.0);
    assert!(report.avg_tiles_destroyed > 0.0);
    assert!(report.avg_animation_secs > 0.0);
}

#[test]
fn test_same_seed_same_report() {
    let config = config(Level::BombChambers, MoveStrategy::Greedy);
    let a = run_simulation(&config).unwrap();
    let b = run_simulation(&config).unwrap();
    assert_eq!(a.to_json(), b.to_json());
}

#[test]
fn test_text_report_names_the_level() {
    let report = run_simulation(&config(Level::BombGrid, MoveStrategy::Random)).unwrap();
    let text = report.to_text();
    assert!(text.contains("Bomb Grid"));
    assert!(text.contains("OBSTACLES"));
}
