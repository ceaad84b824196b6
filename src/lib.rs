//! Hexfall - tile matching on a hexagonal cylinder.
//!
//! The grid wraps around horizontally: column 0 and the last column are
//! neighbours. Activating a coloured tile clears its same-colour group when it
//! is big enough, damaging obstacles along its border and leaving a bomb behind
//! for large groups. Bombs blast their neighbourhood and set off other bombs.
//! Gravity and refill follow every resolution.
//!
//! The engine applies each activation completely before returning and reports
//! what happened as a list of [`engine::MutationEvent`]s for hosts to animate.

pub mod board;
pub mod core;
pub mod engine;
pub mod levels;
pub mod simulator;
pub mod ui;

pub use crate::board::{Grid, Position, Tile, TileKind};
pub use crate::core::{EngineConfig, EngineError, EngineResult};
pub use crate::engine::{Engine, MutationEvent};
pub use crate::levels::{Level, LevelLayout};
