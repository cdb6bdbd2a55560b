//! Score repository seam.
//!
//! The session records finished games through [`ScoreRepository`]. Persistence
//! is best-effort: implementations swallow their own I/O failures, so none of
//! these methods can fail.

use crate::types::MAX_STORED_SCORES;

/// Ranked store of completed-session scores.
pub trait ScoreRepository {
    /// Highest recorded score, or 0 if none.
    fn best_score(&self) -> u32;

    /// Record a score, keeping only the top [`MAX_STORED_SCORES`].
    fn add_score(&mut self, score: u32);

    /// Up to `n` scores, highest first.
    fn top_scores(&self, n: usize) -> Vec<u32>;
}

impl<R: ScoreRepository + ?Sized> ScoreRepository for Box<R> {
    fn best_score(&self) -> u32 {
        (**self).best_score()
    }

    fn add_score(&mut self, score: u32) {
        (**self).add_score(score)
    }

    fn top_scores(&self, n: usize) -> Vec<u32> {
        (**self).top_scores(n)
    }
}

/// In-memory ranked score list, highest first, capped at [`MAX_STORED_SCORES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    scores: Vec<u32>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from scores in any order.
    pub fn from_unsorted(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_STORED_SCORES);
        Self { scores }
    }

    /// Insert a score at its rank and drop whatever falls past the cap.
    pub fn insert(&mut self, score: u32) {
        let pos = self.scores.partition_point(|&s| s >= score);
        self.scores.insert(pos, score);
        self.scores.truncate(MAX_STORED_SCORES);
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreRepository for ScoreTable {
    fn best_score(&self) -> u32 {
        self.scores.first().copied().unwrap_or(0)
    }

    fn add_score(&mut self, score: u32) {
        self.insert(score);
    }

    fn top_scores(&self, n: usize) -> Vec<u32> {
        self.scores.iter().take(n).copied().collect()
    }
}
