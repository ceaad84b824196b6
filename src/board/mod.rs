//! Board model: tiles, the cylindrical grid and its hex topology.
//!
//! Row 0 is the top edge and gravity pulls towards higher row indices. Rows are
//! bounded; columns wrap around the cylinder for every neighbour computation.

pub mod grid;
pub mod topology;
pub mod types;

pub use grid::Grid;
pub use topology::{are_adjacent, neighbors, wrap_col};
pub use types::{ColorType, Position, Tile, TileKind};
