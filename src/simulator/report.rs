//! Simulation report generation.

use serde::Serialize;

use crate::levels::Level;

/// What happened during a single simulated game.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub activations: u32,
    /// Activations that changed nothing (small group, obstacle or gap)
    pub wasted_activations: u32,
    pub matches_resolved: u32,
    pub tiles_destroyed: u64,
    pub tiles_spawned: u64,
    pub bombs_spawned: u32,
    pub bombs_exploded: u32,
    /// Most bombs detonated by one activation
    pub longest_chain: u32,
    pub obstacle_hits: u32,
    pub obstacles_destroyed: u32,
    pub obstacles_at_start: u32,
    pub obstacles_remaining: u32,
    /// Activation on which the last obstacle fell
    pub cleared_at: Option<u32>,
    /// Seconds of animation the host would have played
    pub animation_secs: f64,
}

impl RunStats {
    pub fn cleared(&self) -> bool {
        self.obstacles_at_start > 0 && self.obstacles_remaining == 0
    }
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub level: Level,
    pub num_runs: u32,
    pub moves_per_run: u32,
    pub runs_cleared: u32,

    pub avg_matches: f64,
    pub avg_wasted: f64,
    pub avg_tiles_destroyed: f64,
    pub avg_bombs_spawned: f64,
    pub avg_bombs_exploded: f64,
    pub max_chain: u32,
    pub avg_obstacles_destroyed: f64,
    pub avg_obstacles_remaining: f64,
    pub avg_moves_to_clear: f64,
    pub avg_animation_secs: f64,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn mean(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, level: Level, moves_per_run: u32) -> Self {
        let num_runs = runs.len() as u32;
        let runs_cleared = runs.iter().filter(|r| r.cleared()).count() as u32;

        let clear_moves: Vec<f64> = runs
            .iter()
            .filter_map(|r| r.cleared_at.map(f64::from))
            .collect();
        let avg_moves_to_clear = if clear_moves.is_empty() {
            0.0
        } else {
            clear_moves.iter().sum::<f64>() / clear_moves.len() as f64
        };

        Self {
            level,
            num_runs,
            moves_per_run,
            runs_cleared,
            avg_matches: mean(&runs, |r| f64::from(r.matches_resolved)),
            avg_wasted: mean(&runs, |r| f64::from(r.wasted_activations)),
            avg_tiles_destroyed: mean(&runs, |r| r.tiles_destroyed as f64),
            avg_bombs_spawned: mean(&runs, |r| f64::from(r.bombs_spawned)),
            avg_bombs_exploded: mean(&runs, |r| f64::from(r.bombs_exploded)),
            max_chain: runs.iter().map(|r| r.longest_chain).max().unwrap_or(0),
            avg_obstacles_destroyed: mean(&runs, |r| f64::from(r.obstacles_destroyed)),
            avg_obstacles_remaining: mean(&runs, |r| f64::from(r.obstacles_remaining)),
            avg_moves_to_clear,
            avg_animation_secs: mean(&runs, |r| r.animation_secs),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!("                    Level: {}\n", self.level.name()));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} moves each, {} cleared every obstacle\n\n",
            self.num_runs, self.moves_per_run, self.runs_cleared
        ));

        report.push_str("── MATCHES ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Matches:         {:.1}\n", self.avg_matches));
        report.push_str(&format!("  Avg Wasted Moves:    {:.1}\n", self.avg_wasted));
        report.push_str(&format!(
            "  Avg Tiles Destroyed: {:.0}\n\n",
            self.avg_tiles_destroyed
        ));

        report.push_str("── BOMBS ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Spawned:         {:.2}\n", self.avg_bombs_spawned));
        report.push_str(&format!("  Avg Exploded:        {:.2}\n", self.avg_bombs_exploded));
        report.push_str(&format!("  Longest Chain:       {}\n\n", self.max_chain));

        report.push_str("── OBSTACLES ────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Destroyed:       {:.1}\n",
            self.avg_obstacles_destroyed
        ));
        report.push_str(&format!(
            "  Avg Remaining:       {:.1}\n",
            self.avg_obstacles_remaining
        ));
        if self.runs_cleared > 0 {
            report.push_str(&format!(
                "  Avg Moves to Clear:  {:.1}\n",
                self.avg_moves_to_clear
            ));
        }
        let pct = if self.num_runs > 0 {
            f64::from(self.runs_cleared) / f64::from(self.num_runs) * 100.0
        } else {
            0.0
        };
        let bar: String = "█".repeat((pct / 5.0) as usize);
        report.push_str(&format!("  Cleared: {:>5.1}% {}\n\n", pct, bar));

        report.push_str("── PACING ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Animation Time:  {:.1}s\n",
            self.avg_animation_secs
        ));

        if self.num_runs > 0 && self.avg_wasted > f64::from(self.moves_per_run) * 0.8 {
            report.push_str("\n  ⚠️  Most moves wasted - minimum match too high for this layout?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(matches: u32, obstacles_remaining: u32, cleared_at: Option<u32>) -> RunStats {
        RunStats {
            activations: 10,
            matches_resolved: matches,
            wasted_activations: 10 - matches,
            obstacles_at_start: 4,
            obstacles_remaining,
            cleared_at,
            longest_chain: matches,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_runs_averages() {
        let report = SimReport::from_runs(
            vec![run(2, 0, Some(8)), run(4, 3, None)],
            Level::IslandMaze,
            10,
        );
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.runs_cleared, 1);
        assert_eq!(report.avg_matches, 3.0);
        assert_eq!(report.avg_obstacles_remaining, 1.5);
        assert_eq!(report.avg_moves_to_clear, 8.0);
        assert_eq!(report.max_chain, 4);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), Level::Classic, 10);
        assert_eq!(report.avg_matches, 0.0);
        assert!(report.to_text().contains("Classic"));
    }

    #[test]
    fn test_level_without_obstacles_never_counts_as_cleared() {
        let stats = RunStats::default();
        assert!(!stats.cleared());
    }

    #[test]
    fn test_to_json() {
        let report = SimReport::from_runs(vec![run(1, 4, None)], Level::BombGrid, 10);
        let value: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(value["level"], "BombGrid");
        assert_eq!(value["run_stats"].as_array().unwrap().len(), 1);
    }
}
