//! Autoplay simulator for Monte Carlo analysis of level layouts.
//!
//! Runs many seeded games against the real [`Engine`](crate::engine::Engine)
//! and aggregates what happened:
//! - How quickly obstacles get cleared
//! - How often bombs spawn and how long their chains run
//! - How many activations are wasted on groups below the minimum

mod config;
mod report;
mod runner;

pub use config::{MoveStrategy, SimConfig};
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
