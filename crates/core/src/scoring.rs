use serde::{Deserialize, Serialize};

/// Points awarded for each correctly answered exercise.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Accumulates points over one session.
///
/// The score only ever grows, in steps of [`POINTS_PER_CORRECT`], and is
/// bounded by `max_score = total * POINTS_PER_CORRECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
    max_score: u32,
}

impl ScoreTracker {
    /// Tracker for a session covering `total` exercises, starting at zero.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            score: 0,
            max_score: max_score_for(total),
        }
    }

    /// Zero the score and recompute the maximum for a fresh exercise list.
    pub fn reset(&mut self, total: usize) {
        *self = Self::new(total);
    }

    /// Award points for an answer. Incorrect answers leave the score as-is.
    pub fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.score = (self.score + POINTS_PER_CORRECT).min(self.max_score);
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Derive the end-of-session summary.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_score(self.score, self.max_score)
    }
}

fn max_score_for(total: usize) -> u32 {
    u32::try_from(total)
        .unwrap_or(u32::MAX / POINTS_PER_CORRECT)
        .saturating_mul(POINTS_PER_CORRECT)
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// Aggregate result of a completed session, derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    total: u32,
    correct_count: u32,
    incorrect_count: u32,
    score: u32,
    max_score: u32,
}

impl SessionSummary {
    /// Build a summary from a final score and the session maximum.
    #[must_use]
    pub fn from_score(score: u32, max_score: u32) -> Self {
        let total = max_score / POINTS_PER_CORRECT;
        let correct_count = (score / POINTS_PER_CORRECT).min(total);
        Self {
            total,
            correct_count,
            incorrect_count: total.saturating_sub(correct_count),
            score,
            max_score,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Share of correct answers in percent, rounded. Zero for empty sessions.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let ratio = f64::from(self.correct_count) / f64::from(self.total);
        // total <= u32::MAX keeps the product well inside u32 range.
        (ratio * 100.0).round() as u32
    }

    /// Whether at least half of the exercises were answered correctly.
    ///
    /// Drives the summary title: congratulations for a majority, an
    /// encouragement otherwise.
    #[must_use]
    pub fn is_majority(&self) -> bool {
        self.correct_count >= self.total.div_ceil(2)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
