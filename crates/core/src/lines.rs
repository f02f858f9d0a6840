//! Line clearing and level/booster progression
//!
//! Full rows are found by scanning bottom to top. When a row is removed the
//! row above drops into the same index, so that index is checked again before
//! moving on; stacked full rows are all cleared in one pass.

use crate::board::Board;
use crate::config::GameConfig;

/// Session-wide counters. Reset only by a restart.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Monotonic count of cleared lines
    pub total_lines_cleared: u32,
    /// `total_lines_cleared / lines_per_level`, never decreases
    pub game_level: u32,
    /// Booster charges, always within `[0, booster_max]`
    pub booster: u32,
    /// Fall speed in pixels per second, never decreases
    pub fall_speed: f64,
}

impl Progress {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            total_lines_cleared: 0,
            game_level: 0,
            booster: config.booster_initial.min(config.booster_max),
            fall_speed: config.fall_speed_base,
        }
    }

    /// Account for `lines` freshly cleared lines.
    pub fn record_lines(&mut self, lines: u32, config: &GameConfig) -> LevelChange {
        let mut change = LevelChange {
            previous_level: self.game_level,
            level: self.game_level,
            booster_gained: 0,
        };
        if lines == 0 {
            return change;
        }

        self.total_lines_cleared = self.total_lines_cleared.saturating_add(lines);
        let new_level = self.total_lines_cleared / config.lines_per_level.max(1);

        if new_level >= self.game_level {
            let before = self.booster;
            self.booster = self
                .booster
                .saturating_add(new_level - self.game_level)
                .min(config.booster_max);
            change.booster_gained = self.booster - before;
            self.game_level = new_level;
            self.fall_speed *= config.fall_speed_increment_per_level;
        }

        change.level = self.game_level;
        change
    }

    /// Spend one booster charge. False when none are left.
    pub fn consume_booster(&mut self) -> bool {
        if self.booster == 0 {
            return false;
        }
        self.booster -= 1;
        true
    }

    pub fn booster_enabled(&self) -> bool {
        self.booster > 0
    }
}

/// Level bookkeeping produced by [`Progress::record_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub previous_level: u32,
    pub level: u32,
    pub booster_gained: u32,
}

impl LevelChange {
    pub fn leveled_up(&self) -> bool {
        self.level > self.previous_level
    }
}

/// Result of a line-clearing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Row index of each removal, in removal order. The same index repeats when
    /// stacked rows were cleared.
    pub rows: Vec<usize>,
    pub level: LevelChange,
}

impl LineClear {
    pub fn lines_cleared(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// Remove every full row, shifting rows above down, and return the removed
/// indices. Requests a full redraw when anything was removed.
pub fn remove_full_rows(board: &mut Board) -> Vec<usize> {
    let mut removed = Vec::new();
    let mut row = board.rows();
    while row > 0 {
        let candidate = row - 1;
        if board.is_row_full(candidate) {
            board.shift_rows_down(candidate);
            removed.push(candidate);
            // Re-check the same index: the row above has moved into it.
            continue;
        }
        row -= 1;
    }

    if !removed.is_empty() {
        board.request_redraw();
    }
    removed
}

/// Clear completed lines and update the level/booster counters.
pub fn clear_completed_lines(
    board: &mut Board,
    progress: &mut Progress,
    config: &GameConfig,
) -> LineClear {
    let rows = remove_full_rows(board);
    let level = progress.record_lines(rows.len() as u32, config);
    LineClear { rows, level }
}
