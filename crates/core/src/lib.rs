//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and the session state machine of a timed
//! falling-block game. It has **no dependencies** on terminals, files or
//! audio:
//!
//! - **Deterministic**: the same seed and the same timestamps replay the same game
//! - **Testable**: time is always passed in, never read
//! - **Portable**: terminal, headless simulation or any other front-end
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision queries and line clearing
//! - [`pieces`]: shape matrices, the seven-piece catalog and matrix rotation
//! - [`piece`]: the active piece with movement, rotation fallback and ghost row
//! - [`rng`]: uniform piece selection
//! - [`scoring`]: flat line score, level progression and gravity table
//! - [`session`]: phases, countdown, gravity, lock delay and score recording
//! - [`scores`]: the score repository seam
//! - [`clock`]: monotonic millisecond clocks for hosts
//! - [`snapshot`]: plain render data
//!
//! # Game Rules
//!
//! - **Ultra mode**: score as much as possible in 180 seconds
//! - **Uniform randomizer**: every piece kind is equally likely on every draw
//! - **Fixed-origin rotation**: clockwise, else counter-clockwise, never translated
//! - **Lock delay**: 500ms after the last grounded move or rotation, 5s hard cap
//! - **Scoring**: 100 points per line, a new level every 10 lines
//!
//! # Example
//!
//! ```
//! use ultra_tetris_core::{GameSession, Phase};
//! use ultra_tetris_core::types::GameAction;
//!
//! let mut game: GameSession = GameSession::default();
//! game.apply(GameAction::Start, 0);
//! game.tick(500);
//! game.tick(1000);
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.apply(GameAction::HardDrop, 1100);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod clock;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scores;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use ultra_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ColorGrid};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use piece::Piece;
pub use pieces::{get_shape, piece_color, Shape};
pub use rng::{PieceRandomizer, SimpleRng};
pub use scores::{ScoreRepository, ScoreTable};
pub use scoring::{calculate_line_score, get_drop_interval_ms, level_for_lines};
pub use session::{Events, GameSession, SessionConfig};
pub use snapshot::{format_clock, ActiveSnapshot, GameSnapshot};
pub use types::Phase;
