use std::fmt::Write as _;

use arrayvec::{ArrayString, ArrayVec};

use crate::board::ColorGrid;
use crate::pieces::Shape;
use crate::types::{Color, PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH, GAME_DURATION_SECS, RANKING_SIZE};
use crate::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: *value.shape(),
            color: value.color(),
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub board: ColorGrid,
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the active piece; only set while running.
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub remaining_secs: u32,
    /// Set after a finished game beat the previous best, when highlighting is enabled.
    pub new_record: bool,
    pub top_scores: ArrayVec<u32, RANKING_SIZE>,
    /// Whether `ShowRanking` is available from the finished screen.
    pub ranking_enabled: bool,
    pub episode: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.phase = Phase::Title;
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.next = PieceKind::I;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.remaining_secs = GAME_DURATION_SECS;
        self.new_record = false;
        self.top_scores.clear();
        self.ranking_enabled = false;
        self.episode = 0;
    }

    /// Remaining time as `M:SS`.
    pub fn time_text(&self) -> ArrayString<16> {
        format_clock(self.remaining_secs)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Title,
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            score: 0,
            level: 1,
            lines: 0,
            remaining_secs: GAME_DURATION_SECS,
            new_record: false,
            top_scores: ArrayVec::new(),
            ranking_enabled: false,
            episode: 0,
        }
    }
}

/// Format seconds as `M:SS` without allocating.
///
/// ```
/// use ultra_tetris_core::snapshot::format_clock;
///
/// assert_eq!(format_clock(180).as_str(), "3:00");
/// assert_eq!(format_clock(65).as_str(), "1:05");
/// assert_eq!(format_clock(0).as_str(), "0:00");
/// ```
pub fn format_clock(secs: u32) -> ArrayString<16> {
    let mut out = ArrayString::new();
    // u32::MAX / 60 is 8 digits, so 16 bytes always suffice.
    let _ = write!(out, "{}:{:02}", secs / 60, secs % 60);
    out
}
