//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders a [`core::GameSnapshot`] into a framebuffer that is
//! diffed against the previous frame and flushed to the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use ultra_tetris_core as core;
pub use ultra_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
