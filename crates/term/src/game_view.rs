//! GameView: maps the board canvas, HUD and a session snapshot into a
//! terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::canvas::{BoardCanvas, CanvasCell, Hud};
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the framed board sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, rows: usize, cols: usize, viewport: Viewport) -> BoardLayout {
        let frame_w = (cols as u16).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = (rows as u16).saturating_mul(self.cell_h).saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Board `(row, col)` under a terminal position, if any.
    pub fn cell_at(
        &self,
        rows: usize,
        cols: usize,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> Option<(usize, usize)> {
        let layout = self.layout(rows, cols, viewport);
        let px = column.checked_sub(layout.start_x + 1)?;
        let py = row.checked_sub(layout.start_y + 1)?;
        let (cell_col, cell_row) = ((px / self.cell_w) as usize, (py / self.cell_h) as usize);
        (cell_row < rows && cell_col < cols).then_some((cell_row, cell_col))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Settled blocks come from `canvas`, counters from `hud`; the falling
    /// piece, line count and game-over flag come from `snap`.
    pub fn render_into(
        &self,
        canvas: &BoardCanvas,
        hud: &Hud,
        snap: &GameSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let (rows, cols) = (canvas.rows(), canvas.cols());
        let layout = self.layout(rows, cols, viewport);

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        self.draw_border(fb, layout, border);

        for row in 0..rows {
            for col in 0..cols {
                match canvas.get(row, col) {
                    CanvasCell::Empty => self.draw_empty_cell(fb, layout, row, col),
                    CanvasCell::Block(color) => {
                        self.draw_block(fb, layout, row, col, Rgb::from(color), '█')
                    }
                    CanvasCell::Fading { color, elapsed_ms } => {
                        let faded = Rgb::from(color).mix(BOARD_BG, canvas.fade_level(elapsed_ms));
                        self.draw_block(fb, layout, row, col, faded, '▓');
                    }
                }
            }
        }

        // Active piece; cells above the top edge are not drawn.
        if let Some(active) = &snap.active {
            let fg = Rgb::new(
                (active.color >> 16) as u8,
                (active.color >> 8) as u8,
                active.color as u8,
            );
            for &(x, y) in active.cells.iter() {
                if x >= 0 && y >= 0 && (x as usize) < cols && (y as usize) < rows {
                    self.draw_block(fb, layout, y as usize, x as usize, fg, '█');
                }
            }
        }

        self.draw_side_panel(fb, hud, snap, viewport, layout);

        if snap.game_over {
            self.draw_overlay_text(fb, layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        canvas: &BoardCanvas,
        hud: &Hud,
        snap: &GameSnapshot,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, hud, snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
        let BoardLayout {
            start_x: x,
            start_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, layout: BoardLayout, row: usize, col: usize) {
        let style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: BOARD_BG,
            bold: false,
            dim: true,
        };
        self.fill_cell_rect(fb, layout, row, col, '·', style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        row: usize,
        col: usize,
        fg: Rgb,
        ch: char,
    ) {
        let style = CellStyle {
            fg,
            bg: BOARD_BG,
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, layout, row, col, ch, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        row: usize,
        col: usize,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.start_x + 1 + col as u16 * self.cell_w;
        let py = layout.start_y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        hud: &Hud,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let hint = CellStyle { dim: true, ..value };

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, hud.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BOOSTER", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, hud.booster, value);
        if hud.booster > 0 {
            fb.put_str(panel_x + 3, y, "click", hint);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.total_lines, value);
        y = y.saturating_add(2);

        for line in ["z/x rotate", "arrows move", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: BoardLayout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameSession};
    use crate::types::{Color, ShapeKind};

    fn scene(session: &mut GameSession) -> (BoardCanvas, Hud) {
        let config = session.config();
        let mut canvas = BoardCanvas::new(config.rows, config.cols, config.destroy_animation_ms);
        let mut hud = Hud::default();
        session.flush(&mut canvas, &mut hud);
        (canvas, hud)
    }

    #[test]
    fn test_layout_is_centered() {
        let view = GameView::default();
        let layout = view.layout(20, 10, Viewport::new(80, 24));
        assert_eq!(layout.frame_w, 22);
        assert_eq!(layout.frame_h, 22);
        assert_eq!(layout.start_x, 29);
        assert_eq!(layout.start_y, 1);
    }

    #[test]
    fn test_cell_at_maps_both_columns_of_a_cell() {
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);
        // Board interior starts at (30, 2).
        assert_eq!(view.cell_at(20, 10, viewport, 30, 2), Some((0, 0)));
        assert_eq!(view.cell_at(20, 10, viewport, 31, 2), Some((0, 0)));
        assert_eq!(view.cell_at(20, 10, viewport, 32, 21), Some((19, 1)));
        // Border and outside.
        assert_eq!(view.cell_at(20, 10, viewport, 29, 5), None);
        assert_eq!(view.cell_at(20, 10, viewport, 50, 5), None);
        assert_eq!(view.cell_at(20, 10, viewport, 0, 0), None);
    }

    #[test]
    fn test_render_board_piece_and_panel() {
        let mut session = GameSession::new(GameConfig {
            booster_initial: 1,
            ..GameConfig::default()
        })
        .unwrap();
        session.queue_piece(ShapeKind::Square, 0);
        session.board_mut().set_cell(19, 0, Color::RED);
        session.start();
        session.tick(1000);

        let (canvas, hud) = scene(&mut session);
        let view = GameView::default();
        let fb = view.render(&canvas, &hud, &session.snapshot(), Viewport::new(80, 24));

        // Settled red block at (19, 0) -> x 30..31, y 21.
        let block = fb.get(30, 21).unwrap();
        assert_eq!(block.ch, '█');
        assert_eq!(block.style.fg, Rgb::new(255, 0, 0));

        // Square at columns 4-5, rows 0-1 -> x 38..41, y 2..3.
        let piece = fb.get(38, 3).unwrap();
        assert_eq!(piece.ch, '█');
        assert_eq!(piece.style.fg, Rgb::from(Color::YELLOW));

        // Side panel starts two columns right of the frame.
        assert!(fb.row_text(1).contains("LEVEL"));
        assert!(fb.row_text(4).contains("BOOSTER"));
        assert!(fb.row_text(5).contains("1  click"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.board_mut().set_cell(0, 0, Color::GREEN);
        session.start();
        let (canvas, hud) = scene(&mut session);

        let view = GameView::default();
        let fb = view.render(&canvas, &hud, &session.snapshot(), Viewport::new(80, 24));
        assert!(fb.row_text(12).contains("GAME OVER"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.start();
        let (canvas, hud) = scene(&mut session);
        let view = GameView::default();
        let fb = view.render(&canvas, &hud, &session.snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
