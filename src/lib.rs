//! Booster Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the binary, tests and
//! benches can use `booster_tetris::{core,input,term,types}`.

pub mod event_log;

pub use booster_tetris_core as core;
pub use booster_tetris_input as input;
pub use booster_tetris_term as term;
pub use booster_tetris_types as types;
