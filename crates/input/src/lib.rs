//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`InputEvent`]s and buffers them
//! in a [`CommandQueue`] that the game loop drains every frame.

pub mod map;
pub mod queue;

pub use booster_tetris_types as types;

pub use map::{map_event, map_key, map_mouse, should_quit, InputEvent};
pub use queue::{CommandQueue, QUEUE_CAPACITY};
