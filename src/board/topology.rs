//! Hex adjacency on a cylinder.
//!
//! Columns are vertically offset hex columns. Every cell has its straight
//! neighbours (up, down, left, right) plus one diagonal pair that depends on
//! column parity: even columns reach up-left/up-right, odd columns reach
//! down-left/down-right. Columns wrap, rows do not.

use super::types::Position;

/// (d_row, d_col) offsets for cells in an even column.
const EVEN_COLUMN_OFFSETS: [(isize, isize); 6] = [
    (-1, 0),  // up
    (0, -1),  // left
    (0, 1),   // right
    (1, 0),   // down
    (-1, -1), // up-left
    (-1, 1),  // up-right
];

/// (d_row, d_col) offsets for cells in an odd column.
const ODD_COLUMN_OFFSETS: [(isize, isize); 6] = [
    (-1, 0), // up
    (0, -1), // left
    (0, 1),  // right
    (1, 0),  // down
    (1, -1), // down-left
    (1, 1),  // down-right
];

/// Normalize a possibly negative or overflowing column onto `0..cols`.
pub fn wrap_col(col: isize, cols: usize) -> usize {
    col.rem_euclid(cols as isize) as usize
}

/// Offsets used for a cell in the given column.
pub fn neighbor_offsets(col: usize) -> &'static [(isize, isize); 6] {
    if col % 2 == 0 {
        &EVEN_COLUMN_OFFSETS
    } else {
        &ODD_COLUMN_OFFSETS
    }
}

/// All distinct neighbours of `pos`, rows clipped and columns wrapped.
///
/// Returns up to six positions. On very narrow grids two offsets can wrap onto
/// the same cell; each neighbour is listed once.
pub fn neighbors(pos: Position, rows: usize, cols: usize) -> Vec<Position> {
    let mut result = Vec::with_capacity(6);

    for &(d_row, d_col) in neighbor_offsets(pos.col) {
        let row = pos.row as isize + d_row;
        if row < 0 || row >= rows as isize {
            continue;
        }
        let neighbor = Position::new(row as usize, wrap_col(pos.col as isize + d_col, cols));
        if neighbor != pos && !result.contains(&neighbor) {
            result.push(neighbor);
        }
    }

    result
}

/// Whether `b` is one of the six hex neighbours of `a`.
pub fn are_adjacent(a: Position, b: Position, rows: usize, cols: usize) -> bool {
    neighbors(a, rows, cols).contains(&b)
}
