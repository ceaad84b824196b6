//! Autoplay simulator CLI.
//!
//! Play many seeded games against the real engine and report how a level
//! layout behaves.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 100 random games of Classic
//!   cargo run --bin simulate -- -l 4 --greedy      # Greedy play on Bomb Chambers
//!   cargo run --bin simulate -- --seed 42 --json   # Reproducible, JSON output

use std::env;
use std::path::Path;

use hexfall::core::config::EngineConfig;
use hexfall::levels::Level;
use hexfall::simulator::{run_simulation, MoveStrategy, SimConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    let default_filter = if config.verbosity >= 2 {
        "hexfall=debug"
    } else {
        "hexfall=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║                 HEXFALL AUTOPLAY SIMULATOR                    ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Moves per Run:  {}", config.moves_per_run);
        println!("  Level:          {}", config.level.name());
        println!("  Strategy:       {:?}", config.strategy);
        println!(
            "  Grid:           {}x{}, min match {}",
            config.engine.rows, config.engine.cols, config.engine.minimum_match_count
        );
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    // Presets only pick the starting point; explicit flags always win,
    // wherever they appear.
    let mut config = if args.iter().any(|a| a == "--obstacles") {
        SimConfig::obstacle_clearing()
    } else if args.iter().any(|a| a == "--quick") {
        SimConfig::level_check(Level::Classic)
    } else {
        SimConfig::default()
    };
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-m" | "--moves" => {
                if i + 1 < args.len() {
                    config.moves_per_run = args[i + 1].parse().unwrap_or(config.moves_per_run);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    config.level = Level::from_id(args[i + 1].parse().unwrap_or(0));
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    match EngineConfig::load(Path::new(&args[i + 1])) {
                        Ok(engine) => config.engine = engine,
                        Err(e) => {
                            eprintln!("Failed to load config {}: {}", args[i + 1], e);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "--greedy" => {
                config.strategy = MoveStrategy::Greedy;
            }
            "--casual" => {
                config.engine = EngineConfig::casual();
            }
            "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    if json {
        // Per-run lines would corrupt the JSON document.
        config.verbosity = config.verbosity.min(1);
    }

    (config, json)
}

fn print_help() {
    println!("Hexfall Autoplay Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of games (default: 100)");
    println!("    -m, --moves <M>     Activations per game (default: 200)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -l, --level <ID>    Level layout, 0-4 (default: 0, classic)");
    println!("    -c, --config <F>    Engine config (JSON)");
    println!("    --greedy            Play the largest group instead of random cells");
    println!("    --casual            Casual rules (min match 2, bombs from 4)");
    println!("    --json              Print the report as JSON");
    println!("    --quick             Quick check (20 games of 100 moves)");
    println!("    --obstacles         Greedy clearing of Bomb Chambers");
    println!("    -v, --verbose       Per-game output and debug logs");
    println!("    -h, --help          Show this help");
    println!();
    println!("Logging honours RUST_LOG, e.g. RUST_LOG=hexfall=trace.");
}
