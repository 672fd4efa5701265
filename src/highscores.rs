//! Leaderboard of finished runs
//!
//! Lives for the session only; keeps the top 10 runs by score.

use serde::{Deserialize, Serialize};

use crate::sim::TerminationCause;

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// How a finished run went
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_index: u32,
    pub score: u64,
    /// Height climbed above the start position
    pub height: f32,
    pub ticks: u64,
    pub cause: TerminationCause,
}

/// Session leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RunSummary>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run. Returns the rank achieved, if any.
    pub fn add(&mut self, summary: RunSummary) -> Option<usize> {
        if !self.qualifies(summary.score) {
            return None;
        }

        // Ties keep the earlier run ahead
        let pos = self.entries.iter().position(|e| summary.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, summary);
                i + 1
            }
            None => {
                self.entries.push(summary);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(run_index: u32, score: u64) -> RunSummary {
        RunSummary {
            run_index,
            score,
            height: 0.0,
            ticks: 60,
            cause: TerminationCause::FellOutOfView,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.add(run(0, 0)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_sorted_insert() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(run(0, 5)), Some(1));
        assert_eq!(scores.add(run(1, 12)), Some(1));
        assert_eq!(scores.add(run(2, 7)), Some(2));
        assert_eq!(scores.add(run(3, 7)), Some(3));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.run_index).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
        assert_eq!(scores.top_score(), Some(12));
    }

    #[test]
    fn test_full_board_trims() {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES as u32 {
            scores.add(run(i, 10 + i as u64));
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(11), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.add(run(99, 100)), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(11));
    }
}
