//! Flood-destroy engine
//!
//! Clears the 4-connected region of one color reachable from a start cell.
//! Traversal uses an explicit stack, so region size is bounded only by the
//! board and never by call depth.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::Color;

/// Clear every cell of `target` color connected to `(start_row, start_col)`
/// and return the destroyed `(row, col)` cells in clearing order.
///
/// The stored cell color is the only thing compared. A start cell that is out
/// of bounds, empty or of another color destroys nothing.
pub fn flood_destroy(
    board: &mut Board,
    start_row: usize,
    start_col: usize,
    target: Color,
) -> Vec<(usize, usize)> {
    let (rows, cols) = (board.rows(), board.cols());
    let mut destroyed = Vec::new();
    if start_row >= rows || start_col >= cols {
        return destroyed;
    }

    let mut visited = vec![false; rows * cols];
    let mut stack = vec![(start_row, start_col)];

    while let Some((row, col)) = stack.pop() {
        let idx = row * cols + col;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;

        if board.color(row, col) != Some(target) {
            continue;
        }
        board.destroy_cell(row, col);
        destroyed.push((row, col));

        for (nr, nc) in neighbors(row, col, rows, cols) {
            if !visited[nr * cols + nc] && board.color(nr, nc) == Some(target) {
                stack.push((nr, nc));
            }
        }
    }

    destroyed
}

/// In-bounds 4-neighbors of a cell.
fn neighbors(row: usize, col: usize, rows: usize, cols: usize) -> ArrayVec<(usize, usize), 4> {
    let mut out = ArrayVec::new();
    if row > 0 {
        out.push((row - 1, col));
    }
    if row + 1 < rows {
        out.push((row + 1, col));
    }
    if col > 0 {
        out.push((row, col - 1));
    }
    if col + 1 < cols {
        out.push((row, col + 1));
    }
    out
}
