//! Session event records
//!
//! The session appends one [`GameEvent`] per notable state change; callers drain
//! them with [`GameSession::take_events`](crate::session::GameSession::take_events).
//! Serialized as internally tagged JSON (`{"type": "lines_cleared", ...}`).

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Spawned {
        kind: &'static str,
        quarter_turns: u8,
        x: i32,
        y: i32,
    },
    Committed {
        kind: &'static str,
        cells: Vec<(usize, usize)>,
    },
    LinesCleared {
        rows: Vec<usize>,
        total_lines: u32,
    },
    LevelUp {
        level: u32,
        booster: u32,
        fall_speed: f64,
    },
    BoosterUsed {
        row: usize,
        col: usize,
        color: u32,
        destroyed: usize,
        booster_left: u32,
    },
    ClustersDropped {
        clusters: usize,
        cells: usize,
    },
    GameOver {
        level: u32,
        total_lines: u32,
    },
    Restarted {
        previous_level: u32,
        previous_lines: u32,
    },
}
