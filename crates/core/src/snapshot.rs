use serde::Serialize;

use crate::board::Board;
use crate::piece::ActivePiece;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: &'static str,
    pub color: u32,
    pub x: i32,
    pub y: i32,
    /// Absolute `(x, y)` cells, possibly above the board (`y < 0`)
    pub cells: [(i32, i32); 4],
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            kind: piece.kind.as_str(),
            color: piece.color.0,
            x: piece.grid_x,
            y: piece.grid_y,
            cells: piece.cells(),
        }
    }
}

/// Observable state of a session, for rendering and logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major colors, `None` for empty cells
    pub board: Vec<Vec<Option<u32>>>,
    pub active: Option<ActiveSnapshot>,
    /// Destroyed cells still fading out, with their former color
    pub fading: Vec<(usize, usize, u32)>,
    pub level: u32,
    pub booster: u32,
    pub total_lines: u32,
    pub fall_speed: f64,
    pub booster_enabled: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub(crate) fn board_rows(board: &Board) -> Vec<Vec<Option<u32>>> {
        (0..board.rows())
            .map(|row| {
                board
                    .row(row)
                    .iter()
                    .map(|cell| cell.map(|color| color.0))
                    .collect()
            })
            .collect()
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn occupied_count(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}
