//! Game session - one game's complete state
//!
//! [`GameSession`] owns the board, the level/booster counters and the single
//! active piece, and sequences the engines:
//!
//! - **Spawn**: game over is checked first (top row occupied), then a random
//!   shape and rotation is centered one row above the board.
//! - **Fall**: [`GameSession::tick`] accumulates `elapsed * fall_speed` pixels;
//!   every `block_size` pixels the piece is forced one row down, and the
//!   remainder is dropped. A piece that cannot move down is committed, full
//!   lines are cleared and the next piece spawns.
//! - **Booster**: [`GameSession::activate_cell`] flood-destroys the clicked
//!   color region. The destroyed cells fade for `destroy_animation_ms`, after
//!   which suspended clusters are dropped.
//!
//! The `Option<ActivePiece>` slot is the generation gate: a new piece can only
//! spawn once the previous one has been committed.

use std::collections::VecDeque;
use std::mem;

use anyhow::Result;
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::flood::flood_destroy;
use crate::gravity::{drop_floating_blocks_with, DropReport};
use crate::lines::{clear_completed_lines, LineClear, Progress};
use crate::piece::ActivePiece;
use crate::rng::PieceGenerator;
use crate::sink::{apply_visual_ops, HudSink, RenderSink};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Color, GameCommand, RotateDirection, ShapeKind};

/// Cells destroyed by one booster activation, fading out.
#[derive(Debug, Clone)]
struct Destruction {
    cells: Vec<(usize, usize, Color)>,
    elapsed_ms: u32,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    progress: Progress,
    generator: PieceGenerator,
    /// Pieces to spawn before drawing from the generator
    queued: VecDeque<(ShapeKind, u8)>,
    active: Option<ActivePiece>,
    /// Pixels fallen since the last step
    fall_accumulator: f64,
    /// Remaining fast-fall time after a soft drop
    soft_drop_ms: u32,
    destructions: Vec<Destruction>,
    game_over: bool,
    hud_dirty: bool,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session with an empty board. Call [`GameSession::start`] to
    /// spawn the first piece.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.rows, config.cols),
            progress: Progress::new(&config),
            generator: PieceGenerator::new(config.seed),
            queued: VecDeque::new(),
            active: None,
            fall_accumulator: 0.0,
            soft_drop_ms: 0,
            destructions: Vec::new(),
            game_over: false,
            hud_dirty: true,
            events: Vec::new(),
            config,
        })
    }

    /// Spawn the first piece. False if a piece is already active or the game
    /// is over.
    pub fn start(&mut self) -> bool {
        self.spawn_piece()
    }

    /// Reset board and counters and spawn a fresh piece. The piece generator
    /// keeps its sequence.
    pub fn restart(&mut self) {
        self.events.push(GameEvent::Restarted {
            previous_level: self.progress.game_level,
            previous_lines: self.progress.total_lines_cleared,
        });

        self.board = Board::new(self.config.rows, self.config.cols);
        self.board.request_redraw();
        self.progress = Progress::new(&self.config);
        self.active = None;
        self.fall_accumulator = 0.0;
        self.soft_drop_ms = 0;
        self.destructions.clear();
        self.game_over = false;
        self.hud_dirty = true;

        self.spawn_piece();
    }

    /// Make `kind` in the given orientation the next piece to spawn, ahead of
    /// the random generator.
    pub fn queue_piece(&mut self, kind: ShapeKind, quarter_turns: u8) {
        self.queued.push_back((kind, quarter_turns % 4));
    }

    /// Spawn the next piece.
    ///
    /// Returns false without spawning while a piece is active. If the top row
    /// is occupied the game ends instead.
    pub fn spawn_piece(&mut self) -> bool {
        if self.active.is_some() || self.game_over {
            return false;
        }

        if self.board.is_top_row_occupied() {
            self.game_over = true;
            self.events.push(GameEvent::GameOver {
                level: self.progress.game_level,
                total_lines: self.progress.total_lines_cleared,
            });
            return false;
        }

        let (kind, quarter_turns) = self
            .queued
            .pop_front()
            .unwrap_or_else(|| self.generator.draw());
        let piece = ActivePiece::spawn(kind, quarter_turns, self.board.cols());

        self.events.push(GameEvent::Spawned {
            kind: kind.as_str(),
            quarter_turns,
            x: piece.grid_x,
            y: piece.grid_y,
        });
        self.active = Some(piece);
        self.fall_accumulator = 0.0;
        true
    }

    /// Advance time by `elapsed_ms`: destruction fades first, then the fall
    /// accumulator.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.advance_destructions(elapsed_ms);

        if self.game_over || self.active.is_none() {
            return;
        }

        let mut speed = self.progress.fall_speed;
        if self.soft_drop_ms > 0 {
            speed *= self.config.fall_speed_fast_multiplier;
            self.soft_drop_ms = self.soft_drop_ms.saturating_sub(elapsed_ms);
        }

        self.fall_accumulator += elapsed_ms as f64 / 1000.0 * speed;
        if self.fall_accumulator >= self.config.block_size as f64 {
            self.fall_accumulator = 0.0;
            self.step_down();
        }
    }

    fn step_down(&mut self) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };

        if piece.force_move_down(&self.board) {
            if self.config.gravity_on_fall_step {
                self.run_gravity();
            }
        } else {
            self.lock_piece();
        }
    }

    /// Commit the active piece, clear lines, spawn the next one.
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let cells = piece.commit(&mut self.board);
        self.events.push(GameEvent::Committed {
            kind: piece.kind.as_str(),
            cells: cells.to_vec(),
        });

        self.clear_lines();
        self.spawn_piece();
    }

    /// Apply a command from the input channel. Returns whether anything changed.
    ///
    /// Piece commands are ignored when no piece is active or the game is over;
    /// `Restart` always applies.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::Restart => {
                self.restart();
                true
            }
            _ if self.game_over => false,
            _ => self.steer(command),
        }
    }

    fn steer(&mut self, command: GameCommand) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let board = &self.board;

        match command {
            GameCommand::MoveLeft => piece.move_by(board, -1, 0),
            GameCommand::MoveRight => piece.move_by(board, 1, 0),
            GameCommand::SoftDrop => {
                // A blocked soft drop never commits; the fall tick does that.
                self.soft_drop_ms = self.config.soft_drop_grace_ms;
                piece.move_by(board, 0, 1)
            }
            GameCommand::RotateLeft => piece.rotate(board, RotateDirection::Left),
            GameCommand::RotateRight => piece.rotate(board, RotateDirection::Right),
            GameCommand::Restart => false,
        }
    }

    /// Pointer activation on a board cell: spend one booster charge to
    /// flood-destroy the color region under it.
    ///
    /// Ignored (returns false, no charge spent) when the game is over, no
    /// charges are left or the cell is empty.
    pub fn activate_cell(&mut self, row: usize, col: usize) -> bool {
        if self.game_over || !self.progress.booster_enabled() {
            return false;
        }
        let Some(color) = self.board.color(row, col) else {
            return false;
        };

        let destroyed = flood_destroy(&mut self.board, row, col, color);
        self.progress.consume_booster();
        self.hud_dirty = true;
        self.events.push(GameEvent::BoosterUsed {
            row,
            col,
            color: color.0,
            destroyed: destroyed.len(),
            booster_left: self.progress.booster,
        });

        self.destructions.push(Destruction {
            cells: destroyed
                .into_iter()
                .map(|(r, c)| (r, c, color))
                .collect(),
            elapsed_ms: 0,
        });
        if self.config.destroy_animation_ms == 0 {
            self.advance_destructions(0);
        }
        true
    }

    fn advance_destructions(&mut self, elapsed_ms: u32) {
        if self.destructions.is_empty() {
            return;
        }

        let duration = self.config.destroy_animation_ms;
        for destruction in &mut self.destructions {
            destruction.elapsed_ms = destruction.elapsed_ms.saturating_add(elapsed_ms);
        }
        let (finished, running): (Vec<_>, Vec<_>) = mem::take(&mut self.destructions)
            .into_iter()
            .partition(|d| d.elapsed_ms >= duration);
        self.destructions = running;

        if finished.is_empty() {
            return;
        }
        for destruction in &finished {
            for &(row, col, _) in &destruction.cells {
                self.board.release_visual(row, col);
            }
        }
        if self.config.gravity_after_destroy {
            self.run_gravity();
        }
    }

    /// Clear full rows and update counters.
    pub fn clear_lines(&mut self) -> LineClear {
        let result = clear_completed_lines(&mut self.board, &mut self.progress, &self.config);

        if result.lines_cleared() > 0 {
            self.hud_dirty = true;
            self.events.push(GameEvent::LinesCleared {
                rows: result.rows.clone(),
                total_lines: self.progress.total_lines_cleared,
            });
        }
        if result.level.leveled_up() {
            self.events.push(GameEvent::LevelUp {
                level: self.progress.game_level,
                booster: self.progress.booster,
                fall_speed: self.progress.fall_speed,
            });
        }
        result
    }

    /// Drop every suspended cluster. The active piece counts as an obstacle.
    pub fn drop_floating_blocks(&mut self) -> DropReport {
        self.run_gravity()
    }

    fn run_gravity(&mut self) -> DropReport {
        let mut blocked: ArrayVec<(usize, usize), 4> = ArrayVec::new();
        if let Some(piece) = &self.active {
            for (x, y) in piece.cells() {
                if self.board.in_bounds(y, x) {
                    blocked.push((y as usize, x as usize));
                }
            }
        }

        let report =
            drop_floating_blocks_with(&mut self.board, |row, col| blocked.contains(&(row, col)));
        if report.moved() {
            self.events.push(GameEvent::ClustersDropped {
                clusters: report.clusters_moved,
                cells: report.cells_moved,
            });
        }
        report
    }

    /// Hand queued visual changes to `render` and, if they changed, the level
    /// and booster values to `hud`.
    pub fn flush(&mut self, render: &mut impl RenderSink, hud: &mut impl HudSink) {
        let ops = self.board.take_visual_ops();
        apply_visual_ops(&ops, &self.board, render);

        if mem::take(&mut self.hud_dirty) {
            hud.show_level(self.progress.game_level);
            hud.show_booster(self.progress.booster);
        }
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            board: GameSnapshot::board_rows(&self.board),
            active: self.active.as_ref().map(ActiveSnapshot::from),
            fading: self
                .fading_cells()
                .map(|(row, col, color)| (row, col, color.0))
                .collect(),
            level: self.progress.game_level,
            booster: self.progress.booster,
            total_lines: self.progress.total_lines_cleared,
            fall_speed: self.progress.fall_speed,
            booster_enabled: self.progress.booster_enabled(),
            game_over: self.game_over,
        }
    }

    /// Destroyed cells whose fade is still running and that have not been
    /// refilled since.
    pub fn fading_cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.destructions
            .iter()
            .flat_map(|d| d.cells.iter().copied())
            .filter(move |&(row, col, _)| !self.board.is_occupied(row, col))
    }

    pub fn is_destroying(&self) -> bool {
        !self.destructions.is_empty()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn level(&self) -> u32 {
        self.progress.game_level
    }

    pub fn booster(&self) -> u32 {
        self.progress.booster
    }

    pub fn total_lines_cleared(&self) -> u32 {
        self.progress.total_lines_cleared
    }

    pub fn fall_speed(&self) -> f64 {
        self.progress.fall_speed
    }

    pub fn booster_enabled(&self) -> bool {
        self.progress.booster_enabled()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}
