//! Score counters and accuracy.
//!
//! The counters only move through the `record_*` methods, which keep
//! `correct <= total`. Accuracy is computed on demand and never stored.

use serde::{Deserialize, Serialize};

/// Running answer counts of a drill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// A credited answer.
    pub fn record_correct(&mut self) {
        self.total = self.total.saturating_add(1);
        self.correct = self.correct.saturating_add(1).min(self.total);
    }

    /// An answer without credit (wrong guess or revealed answer).
    pub fn record_miss(&mut self) {
        self.total = self.total.saturating_add(1);
    }

    /// Integer percent of credited answers.
    pub fn accuracy(&self) -> u8 {
        accuracy(self.correct, self.total)
    }
}

/// `round(100 * correct / total)`, or 0 when nothing was answered.
pub fn accuracy(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u64;
    let total = total as u64;
    // Round half up in integer arithmetic.
    ((correct * 200 + total) / (total * 2)) as u8
}

/// How each answered turn ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub incorrect: u32,
    pub revealed: u32,
    pub counted_correct: u32,
    /// Turns answered in conjugation mode, whatever the outcome.
    pub conjugation: u32,
}

impl Tally {
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect + self.revealed + self.counted_correct
    }
}

/// End-of-run summary handed to the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub correct: u32,
    pub total: u32,
    pub accuracy: u8,
    pub tally: Tally,
    pub turns_started: u64,
}
