//! Game configuration
//!
//! Fixed at process start and immutable for the life of a session.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::types::{
    BLOCK_SIZE, BOOSTER_INITIAL, BOOSTER_MAX, DEFAULT_COLS, DEFAULT_ROWS, DESTROY_ANIMATION_MS,
    FALL_SPEED_BASE, FALL_SPEED_FAST_MULTIPLIER, FALL_SPEED_INCREMENT_PER_LEVEL, LINES_PER_LEVEL,
    SOFT_DROP_GRACE_MS,
};

/// Smallest board that still fits every shape in every orientation.
pub const MIN_BOARD_SIDE: usize = 4;

/// Largest accepted board side.
pub const MAX_BOARD_SIDE: usize = 1024;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Pixels per cell; one fall step per `block_size` accumulated pixels
    pub block_size: u32,
    /// Pixels per second at level 0
    pub fall_speed_base: f64,
    pub fall_speed_fast_multiplier: f64,
    pub lines_per_level: u32,
    pub fall_speed_increment_per_level: f64,
    pub booster_initial: u32,
    pub booster_max: u32,
    /// Fade length for flood-destroyed cells; 0 finishes destruction at once
    pub destroy_animation_ms: u32,
    pub soft_drop_grace_ms: u32,
    /// Drop suspended clusters once a destruction completes
    pub gravity_after_destroy: bool,
    /// Also drop suspended clusters after every fall step
    pub gravity_on_fall_step: bool,
    /// Piece generator seed
    pub seed: u32,
    /// JSON-lines event log destination
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            block_size: BLOCK_SIZE,
            fall_speed_base: FALL_SPEED_BASE,
            fall_speed_fast_multiplier: FALL_SPEED_FAST_MULTIPLIER,
            lines_per_level: LINES_PER_LEVEL,
            fall_speed_increment_per_level: FALL_SPEED_INCREMENT_PER_LEVEL,
            booster_initial: BOOSTER_INITIAL,
            booster_max: BOOSTER_MAX,
            destroy_animation_ms: DESTROY_ANIMATION_MS,
            soft_drop_grace_ms: SOFT_DROP_GRACE_MS,
            gravity_after_destroy: true,
            gravity_on_fall_step: false,
            seed: 1,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from `BOOSTER_TETRIS_*` environment variables. Missing or
    /// unparseable values keep their defaults; an unset seed is taken from the
    /// clock.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`GameConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            default: T,
        ) -> T {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        let d = Self::default();
        let seed = lookup("BOOSTER_TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);
        let log_path = lookup("BOOSTER_TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            rows: parsed(&lookup, "BOOSTER_TETRIS_ROWS", d.rows),
            cols: parsed(&lookup, "BOOSTER_TETRIS_COLS", d.cols),
            block_size: parsed(&lookup, "BOOSTER_TETRIS_BLOCK_SIZE", d.block_size),
            fall_speed_base: parsed(&lookup, "BOOSTER_TETRIS_FALL_SPEED", d.fall_speed_base),
            fall_speed_fast_multiplier: parsed(
                &lookup,
                "BOOSTER_TETRIS_FAST_MULTIPLIER",
                d.fall_speed_fast_multiplier,
            ),
            lines_per_level: parsed(&lookup, "BOOSTER_TETRIS_LINES_PER_LEVEL", d.lines_per_level),
            fall_speed_increment_per_level: parsed(
                &lookup,
                "BOOSTER_TETRIS_SPEED_INCREMENT",
                d.fall_speed_increment_per_level,
            ),
            booster_initial: parsed(&lookup, "BOOSTER_TETRIS_BOOSTER_INITIAL", d.booster_initial),
            booster_max: parsed(&lookup, "BOOSTER_TETRIS_BOOSTER_MAX", d.booster_max),
            destroy_animation_ms: parsed(
                &lookup,
                "BOOSTER_TETRIS_DESTROY_MS",
                d.destroy_animation_ms,
            ),
            soft_drop_grace_ms: parsed(&lookup, "BOOSTER_TETRIS_SOFT_DROP_MS", d.soft_drop_grace_ms),
            gravity_after_destroy: parsed(
                &lookup,
                "BOOSTER_TETRIS_GRAVITY_AFTER_DESTROY",
                d.gravity_after_destroy,
            ),
            gravity_on_fall_step: parsed(
                &lookup,
                "BOOSTER_TETRIS_GRAVITY_ON_FALL",
                d.gravity_on_fall_step,
            ),
            seed,
            log_path,
        }
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<()> {
        for (name, side) in [("rows", self.rows), ("cols", self.cols)] {
            if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&side) {
                bail!("{name} must be within {MIN_BOARD_SIDE}..={MAX_BOARD_SIDE}, got {side}");
            }
        }
        if self.block_size == 0 {
            bail!("block_size must be positive");
        }
        for (name, speed) in [
            ("fall_speed_base", self.fall_speed_base),
            ("fall_speed_fast_multiplier", self.fall_speed_fast_multiplier),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                bail!("{name} must be a positive number, got {speed}");
            }
        }
        if !self.fall_speed_increment_per_level.is_finite()
            || self.fall_speed_increment_per_level < 1.0
        {
            bail!(
                "fall_speed_increment_per_level must be at least 1.0, got {}",
                self.fall_speed_increment_per_level
            );
        }
        if self.lines_per_level == 0 {
            bail!("lines_per_level must be positive");
        }
        if self.booster_initial > self.booster_max {
            bail!(
                "booster_initial ({}) exceeds booster_max ({})",
                self.booster_initial,
                self.booster_max
            );
        }
        Ok(())
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
