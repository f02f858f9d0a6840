//! Shared types - data structures and default constants
//!
//! Everything here is plain data with no dependencies, so the core engine, the
//! input layer and the terminal front end all agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Rows are indexed top to bottom,
//! so row 0 is the top (game-over) row and row 19 is the floor.
//!
//! # Default Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 20 | Board height in cells |
//! | `DEFAULT_COLS` | 10 | Board width in cells |
//! | `BLOCK_SIZE` | 40 | Pixel size of one cell |
//! | `FALL_SPEED_BASE` | 40.0 | Fall speed in pixels per second (one cell per second) |
//! | `FALL_SPEED_FAST_MULTIPLIER` | 4.0 | Speed multiplier while soft dropping |
//! | `LINES_PER_LEVEL` | 1 | Cleared lines needed per level |
//! | `FALL_SPEED_INCREMENT_PER_LEVEL` | 1.5 | Fall speed multiplier per level-up |
//! | `BOOSTER_INITIAL` | 0 | Booster charges at game start |
//! | `BOOSTER_MAX` | 10 | Booster charge cap |
//!
//! # Examples
//!
//! ```
//! use booster_tetris_types::{Color, GameCommand, ShapeKind};
//!
//! assert_eq!(ShapeKind::from_str("square"), Some(ShapeKind::Square));
//! assert_eq!(ShapeKind::Line.color(), Color::RED);
//! assert_eq!(GameCommand::from_str("rotateLeft"), Some(GameCommand::RotateLeft));
//! ```

use std::fmt;

/// Default board height in cells (20 rows)
pub const DEFAULT_ROWS: usize = 20;

/// Default board width in cells (10 columns)
pub const DEFAULT_COLS: usize = 10;

/// Size of one cell in pixels; the fall accumulator triggers a step every `BLOCK_SIZE` pixels
pub const BLOCK_SIZE: u32 = 40;

/// Base fall speed in pixels per second
pub const FALL_SPEED_BASE: f64 = 40.0;

/// Fall speed multiplier while a soft drop is active
pub const FALL_SPEED_FAST_MULTIPLIER: f64 = 4.0;

/// Lines needed for one level
pub const LINES_PER_LEVEL: u32 = 1;

/// Fall speed multiplier applied on level-up
pub const FALL_SPEED_INCREMENT_PER_LEVEL: f64 = 1.5;

/// Booster charges at game start
pub const BOOSTER_INITIAL: u32 = 0;

/// Maximum booster charges
pub const BOOSTER_MAX: u32 = 10;

/// Duration of the fade played on flood-destroyed cells
pub const DESTROY_ANIMATION_MS: u32 = 150;

/// How long a soft drop keeps the fast fall speed armed
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Frame interval of the terminal loop (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Relative cell offset `(x, y)` inside a piece; x grows right, y grows down.
pub type Offset = (i32, i32);

/// The four cell offsets making up a piece.
pub type ShapeOffsets = [Offset; 4];

/// Integer-coded 24-bit color (`0xRRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xff0000);
    pub const ORANGE: Color = Color(0xff9d00);
    pub const GREEN: Color = Color(0x29bb00);
    pub const YELLOW: Color = Color(0xfffb00);
    pub const PURPLE: Color = Color(0x9b0089);

    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xff_ffff)
    }
}

/// The five piece shapes
///
/// - **Line**: red, 4x1 bar
/// - **L**: orange
/// - **S**: green
/// - **Square**: yellow, 2x2
/// - **T**: purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    L,
    S,
    Square,
    T,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Line,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Square,
        ShapeKind::T,
    ];

    /// Canonical (unrotated) offsets.
    pub const fn offsets(self) -> ShapeOffsets {
        match self {
            ShapeKind::Line => [(0, 0), (1, 0), (2, 0), (3, 0)],
            ShapeKind::L => [(0, 0), (0, 1), (0, 2), (1, 2)],
            ShapeKind::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            ShapeKind::Square => [(0, 0), (1, 0), (0, 1), (1, 1)],
            ShapeKind::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
        }
    }

    pub const fn color(self) -> Color {
        match self {
            ShapeKind::Line => Color::RED,
            ShapeKind::L => Color::ORANGE,
            ShapeKind::S => Color::GREEN,
            ShapeKind::Square => Color::YELLOW,
            ShapeKind::T => Color::PURPLE,
        }
    }

    /// Parse a shape name (case-insensitive). `"i"` is accepted for the line.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "line" | "i" => Some(ShapeKind::Line),
            "l" => Some(ShapeKind::L),
            "s" => Some(ShapeKind::S),
            "square" | "o" => Some(ShapeKind::Square),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::L => "l",
            ShapeKind::S => "s",
            ShapeKind::Square => "square",
            ShapeKind::T => "t",
        }
    }
}

/// A rotation request. Only these fixed quarter turns exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    /// 90° clockwise
    Right,
    /// 90° counter-clockwise
    Left,
    /// 180°
    Half,
}

/// Discrete commands delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down and arm the fast fall speed
    SoftDrop,
    /// Rotate piece 90° counter-clockwise
    RotateLeft,
    /// Rotate piece 90° clockwise
    RotateRight,
    /// Start a fresh game
    Restart,
}

impl GameCommand {
    /// # Examples
    ///
    /// ```
    /// use booster_tetris_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("softdrop"), Some(GameCommand::SoftDrop));
    /// assert_eq!(GameCommand::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotateleft" => Some(GameCommand::RotateLeft),
            "rotateright" => Some(GameCommand::RotateRight),
            "restart" => Some(GameCommand::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::RotateLeft => "rotateLeft",
            GameCommand::RotateRight => "rotateRight",
            GameCommand::Restart => "restart",
        }
    }
}

/// A board cell: `None` is empty, `Some(color)` is occupied with that color.
///
/// Occupancy is derived from the color, so an occupied cell always has one.
pub type Cell = Option<Color>;
