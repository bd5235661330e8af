//! Scoring
//!
//! A match of `n >= 2` marbles is worth `2^min(n, cap)` points.

use crate::consts::{MIN_MATCH_SIZE, SCORE_EXPONENT_CAP};

/// Points for a match of `size` marbles (0 if it isn't a match).
///
/// A `min_size` below two is treated as two: a lone marble never scores.
pub fn score_delta(size: usize, min_size: usize, exponent_cap: u32) -> u64 {
    if size < min_size.max(MIN_MATCH_SIZE) {
        return 0;
    }
    // Cap keeps the shift in range for u64
    let exponent = (size.min(exponent_cap as usize) as u32).min(63);
    1u64 << exponent
}

/// Running session score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEngine {
    total: u64,
    min_size: usize,
    exponent_cap: u32,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new(MIN_MATCH_SIZE, SCORE_EXPONENT_CAP)
    }
}

impl ScoreEngine {
    pub fn new(min_size: usize, exponent_cap: u32) -> Self {
        Self {
            total: 0,
            min_size: min_size.max(MIN_MATCH_SIZE),
            exponent_cap,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Whether a match of `size` would score
    pub fn counts(&self, size: usize) -> bool {
        score_delta(size, self.min_size, self.exponent_cap) > 0
    }

    /// Continue from an earlier total
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = total;
        self
    }

    /// Add a match to the total and return the points it earned
    pub fn apply_match(&mut self, size: usize) -> u64 {
        let delta = score_delta(size, self.min_size, self.exponent_cap);
        self.total = self.total.saturating_add(delta);
        delta
    }
}

/// Format a score with thousands separators ("12,345")
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
