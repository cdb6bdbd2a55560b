//! Core types module - shared data structures and constants
//!
//! Pure data shared by the engine, the terminal front-end and the score store.
//! Nothing here depends on I/O.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds unless the name says otherwise:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MESSAGE_MS` | 500 | Duration of the "Ready?" and "Go!!" messages |
//! | `GAME_DURATION_SECS` | 180 | Length of a session countdown |
//! | `BASE_DROP_MS` | 500 | Gravity at level 1 |
//! | `DROP_STEP_MS` | 40 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest normal gravity |
//! | `SOFT_DROP_MS` | 50 | Gravity while soft drop is held |
//! | `LOCK_DELAY_MS` | 500 | Grace period since the last grounded move/rotation |
//! | `LOCK_HARD_CAP_MS` | 5000 | Maximum time a piece may stay grounded |
//!
//! # Examples
//!
//! ```
//! use ultra_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn origin (x, y) of every new piece
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Host loop frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Duration of each of the "Ready?" / "Go!!" messages
pub const MESSAGE_MS: u64 = 500;

/// Session countdown length in seconds
pub const GAME_DURATION_SECS: u32 = 180;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u64 = 500;

/// Gravity interval reduction per level
pub const DROP_STEP_MS: u64 = 40;

/// Fastest normal gravity interval
pub const DROP_INTERVAL_MIN_MS: u64 = 100;

/// Gravity interval while soft drop is held (level independent)
pub const SOFT_DROP_MS: u64 = 50;

/// Lock grace period, measured from grounding or the last successful move/rotation
pub const LOCK_DELAY_MS: u64 = 500;

/// A grounded piece locks after this long no matter how often it was reset
pub const LOCK_HARD_CAP_MS: u64 = 5000;

/// Points per cleared line (no multi-line bonus)
pub const LINE_SCORE: u32 = 100;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of scores kept by a score repository
pub const MAX_STORED_SCORES: usize = 100;

/// Number of scores shown on the ranking screen
pub const RANKING_SIZE: usize = 10;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use ultra_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Display color tag stored in board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const MAGENTA: Color = Color::new(255, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const ORANGE: Color = Color::new(255, 140, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Top-level session phase.
///
/// ```text
/// Title -> ReadyMessage -> GoMessage -> Running <-> Paused
///                                       Running -> GameOver | Finished -> Ranking
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Start screen, before the first game.
    Title,
    /// "Ready?" message; a piece is spawned but gravity is idle.
    ReadyMessage,
    /// "Go!!" message.
    GoMessage,
    Running,
    Paused,
    /// The countdown reached zero.
    Finished,
    /// A new piece collided at its spawn position.
    GameOver,
    /// Top-score list shown after a finished game.
    Ranking,
}

impl Phase {
    /// Finished and game-over only leave through an explicit restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished | Phase::GameOver | Phase::Ranking)
    }

    /// Movement, rotation and drops are only honored while running.
    pub fn accepts_piece_input(&self) -> bool {
        matches!(self, Phase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Title => "title",
            Phase::ReadyMessage => "ready",
            Phase::GoMessage => "go",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Finished => "finished",
            Phase::GameOver => "game_over",
            Phase::Ranking => "ranking",
        }
    }
}

/// Commands accepted by the game session
///
/// Each command is honored only in the phases listed on it; anywhere else it
/// is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Leave the title screen (Title)
    Start,
    /// Move piece one cell left (Running)
    MoveLeft,
    /// Move piece one cell right (Running)
    MoveRight,
    /// Switch gravity to the soft-drop interval (Running)
    SoftDropStart,
    /// Switch gravity back to the normal interval (Running, Paused)
    SoftDropStop,
    /// Rotate with the two-orientation fallback (Running)
    Rotate,
    /// Drop to the landing row and lock immediately (Running)
    HardDrop,
    /// Toggle pause (Running, Paused)
    PauseToggle,
    /// Reset the session (Running, Paused, Finished, GameOver, Ranking)
    Restart,
    /// Open the ranking screen (Finished, when enabled)
    ShowRanking,
}

impl GameAction {
    /// Parse action from a camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use ultra_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softDropStart"), Some(GameAction::SoftDropStart));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "pausetoggle" | "pause" => Some(GameAction::PauseToggle),
            "restart" => Some(GameAction::Restart),
            "showranking" => Some(GameAction::ShowRanking),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::PauseToggle => "pauseToggle",
            GameAction::Restart => "restart",
            GameAction::ShowRanking => "showRanking",
        }
    }
}

/// Observable outcome of a tick or command.
///
/// Sessions return these instead of calling audio, rendering or persistence
/// code directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new session began (start or restart).
    SessionStarted,
    PhaseChanged { from: Phase, to: Phase },
    /// The active piece was copied into the board.
    PieceLocked { lines_cleared: u32 },
    LinesCleared { count: u32 },
    LevelChanged { level: u32 },
    GameOver { score: u32 },
    Finished { score: u32, new_record: bool },
    /// The final score was handed to the score repository.
    ScoreRecorded { score: u32 },
    MusicStarted,
    MusicStopped,
}

impl GameEvent {
    /// Sound associated with this event, if any.
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match *self {
            GameEvent::SessionStarted => Some(AudioCue::Start),
            GameEvent::LinesCleared { count } if count >= 4 => Some(AudioCue::Tetris),
            GameEvent::LinesCleared { count } if count > 0 => Some(AudioCue::LineClear),
            GameEvent::GameOver { .. } => Some(AudioCue::GameOver),
            GameEvent::Finished { .. } => Some(AudioCue::Finish),
            GameEvent::MusicStarted => Some(AudioCue::MusicLoopStart),
            GameEvent::MusicStopped => Some(AudioCue::MusicLoopStop),
            _ => None,
        }
    }
}

/// Sounds the audio collaborator can be asked to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Start,
    LineClear,
    Tetris,
    GameOver,
    Finish,
    MusicLoopStart,
    MusicLoopStop,
}

impl AudioCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Start => "start",
            AudioCue::LineClear => "line_clear",
            AudioCue::Tetris => "tetris",
            AudioCue::GameOver => "game_over",
            AudioCue::Finish => "finish",
            AudioCue::MusicLoopStart => "music_start",
            AudioCue::MusicLoopStop => "music_stop",
        }
    }
}
