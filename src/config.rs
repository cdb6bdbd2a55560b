//! Startup configuration read from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TETRIS_SCORE_FILE` | score file path | `$HOME/.tetris_scores.txt` |
//! | `TETRIS_SEED` | piece RNG seed | derived from the wall clock |
//! | `TETRIS_LOG` | log file path | logging off |
//! | `TETRIS_RANKING` | enable the ranking screen | `true` |
//! | `TETRIS_HIGHLIGHT_RECORD` | highlight a new best score | `true` |
//! | `TETRIS_BELL` | ring the terminal bell on sound cues | `false` |

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::SessionConfig;
use crate::scores::default_path;

pub const ENV_SCORE_FILE: &str = "TETRIS_SCORE_FILE";
pub const ENV_SEED: &str = "TETRIS_SEED";
pub const ENV_LOG: &str = "TETRIS_LOG";
pub const ENV_RANKING: &str = "TETRIS_RANKING";
pub const ENV_HIGHLIGHT_RECORD: &str = "TETRIS_HIGHLIGHT_RECORD";
pub const ENV_BELL: &str = "TETRIS_BELL";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a boolean (true/false/1/0/yes/no/on/off), got {value:?}")]
    InvalidBool { name: &'static str, value: String },
    #[error("{name} must be an unsigned 32-bit integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` keeps scores in memory only.
    pub score_file: Option<PathBuf>,
    pub seed: u32,
    pub log_file: Option<PathBuf>,
    pub session: SessionConfig,
    pub bell: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let score_file = get(ENV_SCORE_FILE).map(PathBuf::from).or_else(default_path);
        let seed = match get(ENV_SEED) {
            Some(value) => parse_u32(ENV_SEED, value)?,
            None => clock_seed(),
        };
        let log_file = get(ENV_LOG).map(PathBuf::from);

        let session = SessionConfig {
            ranking_screen: read_bool(ENV_RANKING, get(ENV_RANKING), true)?,
            highlight_new_record: read_bool(
                ENV_HIGHLIGHT_RECORD,
                get(ENV_HIGHLIGHT_RECORD),
                true,
            )?,
        };
        let bell = read_bool(ENV_BELL, get(ENV_BELL), false)?;

        Ok(Self {
            score_file,
            seed,
            log_file,
            session,
            bell,
        })
    }
}

fn read_bool(name: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { name, value }),
    }
}

fn parse_u32(name: &'static str, value: String) -> Result<u32, ConfigError> {
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
