//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks the
//! held soft-drop key, including on terminals that never report key releases.

pub mod handler;
pub mod map;

pub use ultra_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
