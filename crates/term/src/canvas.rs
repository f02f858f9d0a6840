//! Terminal-side visual state, fed through the core's sink traits.
//!
//! [`BoardCanvas`] is the terminal's version of the grid of displayed blocks:
//! it only changes when the session flushes visual operations into it. [`Hud`]
//! holds the last level and booster values it was shown.

use crate::core::{Board, HudSink, RenderSink};
use crate::types::Color;

/// What is displayed at one board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasCell {
    #[default]
    Empty,
    Block(Color),
    /// A destroyed block fading out; `elapsed_ms` since the fade started
    Fading { color: Color, elapsed_ms: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCanvas {
    rows: usize,
    cols: usize,
    cells: Vec<CanvasCell>,
    fade_ms: u32,
}

impl BoardCanvas {
    pub fn new(rows: usize, cols: usize, fade_ms: u32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CanvasCell::Empty; rows * cols],
            fade_ms,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> CanvasCell {
        self.index(row, col)
            .map(|i| self.cells[i])
            .unwrap_or_default()
    }

    fn set(&mut self, row: usize, col: usize, cell: CanvasCell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    /// Advance running fades.
    pub fn advance(&mut self, elapsed_ms: u32) {
        for cell in &mut self.cells {
            if let CanvasCell::Fading { elapsed_ms: e, .. } = cell {
                *e = e.saturating_add(elapsed_ms);
            }
        }
    }

    /// Fade progress in `0..=255` (255 fully faded).
    pub fn fade_level(&self, elapsed_ms: u32) -> u8 {
        if self.fade_ms == 0 {
            return 255;
        }
        (elapsed_ms.min(self.fade_ms) as u64 * 255 / self.fade_ms as u64) as u8
    }
}

impl RenderSink for BoardCanvas {
    fn place_visual(&mut self, row: usize, col: usize, color: Color) {
        self.set(row, col, CanvasCell::Block(color));
    }

    fn remove_visual(&mut self, row: usize, col: usize) {
        self.set(row, col, CanvasCell::Empty);
    }

    fn fade_visual(&mut self, row: usize, col: usize, color: Color) {
        self.set(row, col, CanvasCell::Fading { color, elapsed_ms: 0 });
    }

    fn redraw_all(&mut self, board: &Board) {
        self.rows = board.rows();
        self.cols = board.cols();
        self.cells.clear();
        self.cells.extend(board.cells().iter().map(|cell| match cell {
            Some(color) => CanvasCell::Block(*color),
            None => CanvasCell::Empty,
        }));
    }
}

/// Level and booster text values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub level: u32,
    pub booster: u32,
}

impl HudSink for Hud {
    fn show_level(&mut self, level: u32) {
        self.level = level;
    }

    fn show_booster(&mut self, booster: u32) {
        self.booster = booster;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameSession};

    #[test]
    fn test_canvas_follows_session() {
        let mut session = GameSession::new(GameConfig {
            booster_initial: 2,
            ..GameConfig::default()
        })
        .unwrap();
        session.board_mut().set_cell(19, 0, Color::RED);
        session.board_mut().set_cell(19, 1, Color::GREEN);

        let mut canvas = BoardCanvas::new(20, 10, 150);
        let mut hud = Hud::default();
        session.flush(&mut canvas, &mut hud);
        assert_eq!(canvas.get(19, 0), CanvasCell::Block(Color::RED));
        assert_eq!(hud.booster, 2);

        session.activate_cell(19, 0);
        session.flush(&mut canvas, &mut hud);
        assert_eq!(
            canvas.get(19, 0),
            CanvasCell::Fading { color: Color::RED, elapsed_ms: 0 }
        );
        assert_eq!(hud.booster, 1);

        canvas.advance(100);
        session.tick(150);
        session.flush(&mut canvas, &mut hud);
        assert_eq!(canvas.get(19, 0), CanvasCell::Empty);
        assert_eq!(canvas.get(19, 1), CanvasCell::Block(Color::GREEN));
    }

    #[test]
    fn test_redraw_rebuilds_from_board() {
        let mut canvas = BoardCanvas::new(2, 2, 150);
        canvas.fade_visual(0, 0, Color::RED);
        let board = Board::from_pattern(&["..", "Y."]);
        canvas.redraw_all(&board);
        assert_eq!(canvas.get(0, 0), CanvasCell::Empty);
        assert_eq!(canvas.get(1, 0), CanvasCell::Block(Color::YELLOW));
    }

    #[test]
    fn test_fade_level() {
        let canvas = BoardCanvas::new(1, 1, 100);
        assert_eq!(canvas.fade_level(0), 0);
        assert_eq!(canvas.fade_level(50), 127);
        assert_eq!(canvas.fade_level(500), 255);
        assert_eq!(BoardCanvas::new(1, 1, 0).fade_level(0), 255);
    }
}
