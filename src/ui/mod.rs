//! Terminal rendering.

pub mod board_scene;

pub use board_scene::{render_board, BoardView};
