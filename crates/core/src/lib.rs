//! Core game logic - the board-state engine
//!
//! Everything that decides what happens on the board lives here. There is no
//! drawing, input or I/O: presentation is reached through the [`RenderSink`]
//! and [`HudSink`] traits, and time arrives as elapsed milliseconds.
//!
//! # Module Structure
//!
//! - [`board`]: the `rows x cols` grid of [`Cell`](types::Cell)s and its mutation API
//! - [`shapes`]: quarter-turn rotation and normalization of piece offsets
//! - [`piece`]: the active piece (movement, rotation, commit)
//! - [`lines`]: line clearing plus level/booster/fall-speed progression
//! - [`gravity`]: connected clusters falling as rigid groups
//! - [`flood`]: booster flood-destroy of one color region
//! - [`session`]: [`GameSession`], which owns all of the above for one game
//! - [`config`], [`rng`], [`events`], [`snapshot`], [`sink`]: supporting pieces
//!
//! # Game Rules
//!
//! - Five shapes (line, L, S, square, T), each spawning in a random rotation
//! - No wall kicks: a blocked rotation simply fails
//! - Full rows are cleared; every `lines_per_level` lines is one level, worth
//!   one booster charge and a faster fall
//! - A booster charge destroys the 4-connected same-color region under the
//!   pointer; clusters left hanging then fall until they rest
//! - The game ends when a piece is about to spawn while the top row is occupied
//!
//! # Example
//!
//! ```
//! use booster_tetris_core::{GameConfig, GameSession};
//! use booster_tetris_types::{GameCommand, ShapeKind};
//!
//! let mut session = GameSession::new(GameConfig::default()).unwrap();
//! session.queue_piece(ShapeKind::Square, 0);
//! session.start();
//!
//! session.apply_command(GameCommand::MoveLeft);
//! session.tick(1000);
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.active.unwrap().y, 0);
//! ```

pub mod board;
pub mod config;
pub mod events;
pub mod flood;
pub mod gravity;
pub mod lines;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod sink;
pub mod snapshot;

pub use booster_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use events::GameEvent;
pub use flood::flood_destroy;
pub use gravity::{drop_floating_blocks, find_clusters, Cluster, DropReport};
pub use lines::{clear_completed_lines, LevelChange, LineClear, Progress};
pub use piece::ActivePiece;
pub use rng::{PieceGenerator, SimpleRng};
pub use session::GameSession;
pub use sink::{HudSink, RenderSink, VisualOp};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
