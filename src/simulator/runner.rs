//! Main simulation runner, driving the real [`Engine`] with autoplay moves.
//!
//! Statistics are tracked externally from the mutation events each
//! activation returns.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::{MoveStrategy, SimConfig};
use super::report::{RunStats, SimReport};
use crate::board::{Position, Tile};
use crate::core::error::EngineResult;
use crate::engine::{total_duration, Engine, EventSummary, MutationEvent};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> EngineResult<SimReport> {
    config.engine.validate()?;
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng)?;

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Matches {}, Bombs {}/{}, Chain {}, Obstacles {}/{}",
                run_idx + 1,
                config.num_runs,
                stats.matches_resolved,
                stats.bombs_exploded,
                stats.bombs_spawned,
                stats.longest_chain,
                stats.obstacles_remaining,
                stats.obstacles_at_start,
            );
        }
        tracing::debug!(run = run_idx, matches = stats.matches_resolved, "run finished");
        all_runs.push(stats);
    }

    Ok(SimReport::from_runs(all_runs, config.level, config.moves_per_run))
}

/// Play one game. The engine gets its own RNG stream, seeded from `rng`, so
/// move choice and refill colours stay independent.
fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> EngineResult<RunStats> {
    let engine_rng = ChaCha8Rng::seed_from_u64(rng.gen());
    let mut engine = Engine::new(config.engine.clone(), config.level, engine_rng)?;

    let mut stats = RunStats {
        obstacles_at_start: engine.obstacles_remaining() as u32,
        ..Default::default()
    };

    for move_idx in 1..=config.moves_per_run {
        let target = pick_move(&engine, config.strategy, rng);
        let was_colored = matches!(engine.grid().get(target), Some(Tile::Colored { .. }));
        let events = engine.activate_cell(target.row, target.col)?;
        record_activation(&mut stats, &events, was_colored);
        stats.animation_secs += f64::from(total_duration(&engine.timeline(&events)));

        if stats.obstacles_at_start > 0
            && stats.cleared_at.is_none()
            && engine.obstacles_remaining() == 0
        {
            stats.cleared_at = Some(move_idx);
        }
    }

    stats.obstacles_remaining = engine.obstacles_remaining() as u32;
    Ok(stats)
}

fn record_activation(stats: &mut RunStats, events: &[MutationEvent], was_colored: bool) {
    stats.activations += 1;
    if events.is_empty() {
        stats.wasted_activations += 1;
        return;
    }

    let summary = EventSummary::from_events(events);
    if was_colored {
        stats.matches_resolved += 1;
    }
    stats.tiles_destroyed += (summary.destroyed - summary.obstacles_destroyed) as u64;
    stats.tiles_spawned += summary.spawned_colored as u64;
    stats.bombs_spawned += summary.spawned_bombs as u32;
    stats.bombs_exploded += summary.exploded as u32;
    stats.longest_chain = stats.longest_chain.max(summary.exploded as u32);
    stats.obstacle_hits += summary.obstacle_hits as u32;
    stats.obstacles_destroyed += summary.obstacles_destroyed as u32;
}

fn pick_move<R: Rng>(
    engine: &Engine<R>,
    strategy: MoveStrategy,
    rng: &mut ChaCha8Rng,
) -> Position {
    let grid = engine.grid();
    let random = |rng: &mut ChaCha8Rng| {
        Position::new(rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()))
    };

    match strategy {
        MoveStrategy::Random => random(rng),
        MoveStrategy::Greedy => {
            let min = engine.config().minimum_match_count;
            let best = grid
                .positions()
                .filter_map(|pos| engine.find_match(pos))
                .filter(|found| found.len() >= min)
                .max_by_key(|found| (found.len(), found.adjacent_obstacles.len()))
                .map(|found| found.origin);
            best.or_else(|| {
                grid.positions()
                    .find(|pos| grid.get(*pos).is_some_and(Tile::is_bomb))
            })
            .unwrap_or_else(|| random(rng))
        }
    }
}
