//! Collaborator seams for presentation.
//!
//! The core never draws anything. Board mutations queue [`VisualOp`]s and the
//! session hands them to whatever [`RenderSink`] the front end provides, which
//! owns the mapping from grid cell to displayed primitive. Level and booster
//! values go to a [`HudSink`].

use crate::board::Board;
use crate::types::Color;

/// A pending change to the visual representation of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualOp {
    /// A cell became occupied.
    Place { row: usize, col: usize, color: Color },
    /// The visual at a cell must be detached.
    Remove { row: usize, col: usize },
    /// A cell was destroyed and its visual should start fading out. A later
    /// `Remove` for the same cell ends the fade.
    Fade { row: usize, col: usize, color: Color },
    /// Whole-board refresh (after rows shift).
    RedrawAll,
}

/// Receives board visual changes.
pub trait RenderSink {
    fn place_visual(&mut self, row: usize, col: usize, color: Color);

    fn remove_visual(&mut self, row: usize, col: usize);

    /// Start the destruction fade of a cell. Sinks without animation treat the
    /// cell as removed right away.
    fn fade_visual(&mut self, row: usize, col: usize, _color: Color) {
        // Fall back to detaching immediately.
        self.remove_visual(row, col);
    }

    fn redraw_all(&mut self, board: &Board);
}

/// Receives the counters shown as text next to the board.
pub trait HudSink {
    fn show_level(&mut self, level: u32);

    fn show_booster(&mut self, booster: u32);
}

/// Apply queued operations in order. A `RedrawAll` makes every earlier operation
/// redundant, so only the tail after the last redraw is replayed.
pub fn apply_visual_ops(ops: &[VisualOp], board: &Board, sink: &mut impl RenderSink) {
    let start = ops
        .iter()
        .rposition(|op| matches!(op, VisualOp::RedrawAll))
        .map(|i| {
            sink.redraw_all(board);
            i + 1
        })
        .unwrap_or(0);

    for op in &ops[start..] {
        match *op {
            VisualOp::Place { row, col, color } => sink.place_visual(row, col, color),
            VisualOp::Remove { row, col } => sink.remove_visual(row, col),
            VisualOp::Fade { row, col, color } => sink.fade_visual(row, col, color),
            VisualOp::RedrawAll => {}
        }
    }
}
