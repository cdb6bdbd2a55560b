//! Plain-text score file
//!
//! One decimal score per line, highest first, at most
//! [`MAX_STORED_SCORES`](ultra_tetris_core::types::MAX_STORED_SCORES) lines.
//! Blank and unparsable lines are skipped on load. A missing or unreadable
//! file behaves as an empty list.
//!
//! Persistence is best-effort: the [`ScoreRepository`] impl logs write
//! failures and keeps the in-memory ranking. Callers that want to see the
//! error use [`ScoreFile::try_save`].

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ultra_tetris_core::{ScoreRepository, ScoreTable};

/// Default file name under the user's home directory.
pub const DEFAULT_FILE_NAME: &str = ".tetris_scores.txt";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read score file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write score file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Score repository backed by a text file.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
    table: ScoreTable,
}

impl ScoreFile {
    /// Open `path`, loading whatever scores it already holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match read_scores(&path) {
            Ok(table) => table,
            Err(error) => {
                tracing::warn!(%error, "starting with an empty score list");
                ScoreTable::new()
            }
        };
        tracing::debug!(path = %path.display(), count = table.len(), "score file loaded");
        Self { path, table }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scores currently held, highest first.
    pub fn scores(&self) -> &[u32] {
        self.table.as_slice()
    }

    /// Re-read the file, replacing the in-memory list.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.table = read_scores(&self.path)?;
        Ok(())
    }

    /// The file's current contents, or the cached list when it cannot be read.
    fn current(&self) -> Cow<'_, ScoreTable> {
        match read_scores(&self.path) {
            Ok(table) => Cow::Owned(table),
            Err(error) => {
                tracing::debug!(%error, "using cached scores");
                Cow::Borrowed(&self.table)
            }
        }
    }

    /// Write the current list, one score per line.
    pub fn try_save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let mut text = String::with_capacity(self.table.len() * 8);
        for score in self.table.as_slice() {
            text.push_str(&score.to_string());
            text.push('\n');
        }
        fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreRepository for ScoreFile {
    /// Read from disk so scores saved by another instance count.
    fn best_score(&self) -> u32 {
        self.current().best_score()
    }

    /// Merge with the file's current contents, insert and write back.
    fn add_score(&mut self, score: u32) {
        if let Err(error) = self.reload() {
            tracing::warn!(%error, "keeping cached scores");
        }
        self.table.insert(score);
        match self.try_save() {
            Ok(()) => tracing::info!(score, path = %self.path.display(), "score saved"),
            Err(error) => tracing::warn!(%error, score, "score kept in memory only"),
        }
    }

    fn top_scores(&self, n: usize) -> Vec<u32> {
        self.current().top_scores(n)
    }
}

/// `$HOME/.tetris_scores.txt`, or `None` when `HOME` is unset.
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(DEFAULT_FILE_NAME))
}

/// Parse score file contents, skipping blank and malformed lines.
pub fn parse_scores(text: &str) -> ScoreTable {
    let scores = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match line.parse::<u32>() {
            Ok(score) => Some(score),
            Err(_) => {
                tracing::debug!(line, "skipping malformed score line");
                None
            }
        })
        .collect();
    ScoreTable::from_unsorted(scores)
}

fn read_scores(path: &Path) -> Result<ScoreTable, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_scores(&text)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(ScoreTable::new()),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
