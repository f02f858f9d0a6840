//! Board module - the occupancy/color grid
//!
//! The board is a `rows x cols` grid stored as one flat, row-major vector.
//! Each cell is an [`Cell`]: `None` when empty, `Some(color)` when occupied, so
//! a cell can never be occupied without a color (or colored while empty).
//! Coordinates are `(row, col)`: row 0 is the top (game-over) row, row
//! `rows - 1` is the floor.
//!
//! [`Board::set_cell`], [`Board::clear_cell`] and [`Board::destroy_cell`] are the
//! only per-cell mutations. Each one queues the matching [`VisualOp`] so the
//! rendering side can follow along without a parallel structure of its own.

use crate::sink::VisualOp;
use crate::types::{Cell, Color};

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
    /// Visual changes not yet handed to a render sink
    pending: Vec<VisualOp>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            pending: Vec::new(),
        }
    }

    /// Build a board from text rows for tests and debugging.
    ///
    /// `.` is empty; any other glyph is an occupied cell colored by
    /// [`color_for_glyph`]. The first row sets the width; shorter rows are
    /// padded with empty cells and longer ones truncated.
    ///
    /// ```
    /// use booster_tetris_core::Board;
    ///
    /// let board = Board::from_pattern(&["..", "RY"]);
    /// assert!(board.is_occupied(1, 0));
    /// assert!(!board.is_occupied(0, 1));
    /// ```
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let rows = pattern.len();
        let cols = pattern.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut board = Self::new(rows, cols);
        for (row, line) in pattern.iter().enumerate() {
            for (col, glyph) in line.chars().take(cols).enumerate() {
                board.cells[row * cols + col] = color_for_glyph(glyph);
            }
        }
        board
    }

    /// Inverse of [`Board::from_pattern`].
    pub fn to_pattern(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .map(|cell| cell.map(glyph_for_color).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Signed bounds check used by piece movement.
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Get cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Color of an occupied cell
    pub fn color(&self, row: usize, col: usize) -> Option<Color> {
        self.get(row, col).flatten()
    }

    /// Out-of-range coordinates answer `false`.
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// True iff every cell in the row is occupied
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows || self.cols == 0 {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Game-over predicate: anything in row 0
    pub fn is_top_row_occupied(&self) -> bool {
        self.rows > 0 && self.row(0).iter().any(|cell| cell.is_some())
    }

    /// Occupy a cell. Returns false if out of bounds.
    pub fn set_cell(&mut self, row: usize, col: usize, color: Color) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = Some(color);
                self.pending.push(VisualOp::Place { row, col, color });
                true
            }
            None => false,
        }
    }

    /// Empty a cell and detach its visual. Returns the color it held.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> Option<Color> {
        let idx = self.index(row, col)?;
        let old = self.cells[idx].take();
        if old.is_some() {
            self.pending.push(VisualOp::Remove { row, col });
        }
        old
    }

    /// Empty a cell whose visual fades out instead of vanishing.
    pub fn destroy_cell(&mut self, row: usize, col: usize) -> Option<Color> {
        let idx = self.index(row, col)?;
        let color = self.cells[idx].take()?;
        self.pending.push(VisualOp::Fade { row, col, color });
        Some(color)
    }

    /// Detach the visual of a cell that is (still) empty, ending a fade.
    /// Returns false when the cell has been reoccupied in the meantime.
    pub fn release_visual(&mut self, row: usize, col: usize) -> bool {
        match self.get(row, col) {
            Some(None) => {
                self.pending.push(VisualOp::Remove { row, col });
                true
            }
            _ => false,
        }
    }

    /// Copy row `from_row - 1` into `from_row`, and so on up to row 1, then
    /// clear row 0. The net effect removes `from_row` and shifts everything
    /// above it down by one.
    pub fn shift_rows_down(&mut self, from_row: usize) {
        if from_row >= self.rows {
            return;
        }

        let width = self.cols;
        // copy_within handles the overlapping ranges
        for row in (1..=from_row).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(None);
    }

    /// Ask the render side for a full refresh.
    pub fn request_redraw(&mut self) {
        self.pending.push(VisualOp::RedrawAll);
    }

    /// Drain queued visual operations.
    pub fn take_visual_ops(&mut self) -> Vec<VisualOp> {
        std::mem::take(&mut self.pending)
    }

    /// Cells of one row; empty for an out-of-range row
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.rows {
            return &[];
        }
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Iterate `(row, col, color)` over occupied cells, top to bottom.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, cell)| cell.map(|color| (idx / cols, idx % cols, color)))
    }
}

impl PartialEq for Board {
    /// Boards compare by contents; queued visual ops are not part of the state.
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }
}

/// Pattern glyphs: `R`ed, `O`range, `G`reen, `Y`ellow, `P`urple; anything else
/// that is not `.` becomes a neutral gray block.
pub fn color_for_glyph(glyph: char) -> Cell {
    match glyph {
        '.' => None,
        'R' => Some(Color::RED),
        'O' => Some(Color::ORANGE),
        'G' => Some(Color::GREEN),
        'Y' => Some(Color::YELLOW),
        'P' => Some(Color::PURPLE),
        _ => Some(GRAY),
    }
}

const GRAY: Color = Color(0x808080);

fn glyph_for_color(color: Color) -> char {
    match color {
        Color::RED => 'R',
        Color::ORANGE => 'O',
        Color::GREEN => 'G',
        Color::YELLOW => 'Y',
        Color::PURPLE => 'P',
        _ => '#',
    }
}
