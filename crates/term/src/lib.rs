//! Terminal front end.
//!
//! The session pushes visual changes into a [`BoardCanvas`] and counters into
//! a [`Hud`] (the core's render and display sinks). [`GameView`] draws those,
//! plus the falling piece from a snapshot, into a [`FrameBuffer`], and
//! [`TerminalRenderer`] diff-flushes the framebuffer with crossterm.
//!
//! Each board cell is 2 terminal columns wide to keep blocks roughly square.

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use booster_tetris_core as core;
pub use booster_tetris_types as types;

pub use canvas::{BoardCanvas, CanvasCell, Hud};
pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
