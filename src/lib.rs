//! Ultra Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the
//! application-level pieces: environment configuration, log setup and sound
//! cue routing.

pub use ultra_tetris_core as core;
pub use ultra_tetris_input as input;
pub use ultra_tetris_scores as scores;
pub use ultra_tetris_term as term;
pub use ultra_tetris_types as types;

pub mod audio;
pub mod config;
pub mod logging;
