//! Piece controller - the one falling piece
//!
//! An [`ActivePiece`] is a normalized shape plus a grid anchor. Every move or
//! rotation is validated against the board first and applied only when every
//! resulting cell is legal; a rejected request leaves the piece untouched.
//!
//! Cells above the visible board (`y < 0`) are always legal, which lets pieces
//! spawn partially above the top edge and fall in.
//!
//! Committing consumes the piece, so there is nothing left to clean up (and
//! nothing that could keep reacting to input) once its cells are on the board.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::shapes::{oriented_shape, rotate_shape, shape_width};
use crate::types::{Color, RotateDirection, ShapeKind, ShapeOffsets};

/// Anchor row for new pieces: one row above the visible board
pub const SPAWN_ROW: i32 = -1;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub color: Color,
    /// Normalized offsets (minimum is `(0, 0)`)
    pub offsets: ShapeOffsets,
    /// Anchor column
    pub grid_x: i32,
    /// Anchor row (may be negative while entering the board)
    pub grid_y: i32,
}

impl ActivePiece {
    /// Create a piece in its spawn orientation, horizontally centered on a board
    /// `cols` wide (half-cell offsets round to the right) and anchored at
    /// [`SPAWN_ROW`].
    pub fn spawn(kind: ShapeKind, quarter_turns: u8, cols: usize) -> Self {
        let offsets = oriented_shape(kind, quarter_turns);
        let free = cols as i32 - shape_width(&offsets);
        Self {
            kind,
            color: kind.color(),
            offsets,
            grid_x: (free + 1).div_euclid(2),
            grid_y: SPAWN_ROW,
        }
    }

    /// Absolute `(x, y)` of every cell.
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.offsets
            .map(|(ox, oy)| (self.grid_x + ox, self.grid_y + oy))
    }

    /// Would `shape`, anchored at the current position shifted by `(dx, dy)`,
    /// fit on the board?
    pub fn can_move(&self, board: &Board, shape: &ShapeOffsets, dx: i32, dy: i32) -> bool {
        let cols = board.cols() as i32;
        let rows = board.rows() as i32;
        shape.iter().all(|&(ox, oy)| {
            let gx = self.grid_x + dx + ox;
            let gy = self.grid_y + dy + oy;
            if gx < 0 || gx >= cols || gy >= rows {
                return false;
            }
            // Above the top edge is always free.
            gy < 0 || !board.is_occupied(gy as usize, gx as usize)
        })
    }

    /// Shift the piece; false (and no change) if blocked.
    pub fn move_by(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        if !self.can_move(board, &self.offsets, dx, dy) {
            return false;
        }
        self.grid_x += dx;
        self.grid_y += dy;
        true
    }

    /// One row down. `false` means the piece has landed.
    pub fn force_move_down(&mut self, board: &Board) -> bool {
        self.move_by(board, 0, 1)
    }

    /// Rotate in place. No kick search: a blocked rotation simply fails.
    pub fn rotate(&mut self, board: &Board, direction: RotateDirection) -> bool {
        let candidate = rotate_shape(&self.offsets, direction);
        if !self.can_move(board, &candidate, 0, 0) {
            return false;
        }
        self.offsets = candidate;
        true
    }

    /// Lowest anchor row reachable by falling straight down.
    pub fn landing_row(&self, board: &Board) -> i32 {
        let mut drop = 0;
        while self.can_move(board, &self.offsets, 0, drop + 1) {
            drop += 1;
        }
        self.grid_y + drop
    }

    /// Write the piece into the board and return the `(row, col)` cells that
    /// landed inside it. Cells still above the top edge are dropped.
    pub fn commit(self, board: &mut Board) -> ArrayVec<(usize, usize), 4> {
        let mut written = ArrayVec::new();
        for (x, y) in self.cells() {
            if !board.in_bounds(y, x) {
                continue;
            }
            let (row, col) = (y as usize, x as usize);
            if board.set_cell(row, col, self.color) {
                written.push((row, col));
            }
        }
        written
    }
}
