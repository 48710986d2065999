use std::time::Duration;

use crate::model::tier::Difficulty;

/// Number of exercises a session may cover, inclusive bounds.
pub const MIN_EXERCISES: u8 = 1;
pub const MAX_EXERCISES: u8 = 5;

/// Display-only configuration fields, shown by the renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigMetadata {
    pub author: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub app_name: Option<String>,
    pub platforms: Vec<String>,
}

/// Unvalidated session configuration, as gathered from a config document.
///
/// Every field is optional; `build` clamps values into range and fills the
/// rest with defaults. Out-of-range input is a normal condition here, not an
/// error: a broken config document must never block session start.
#[derive(Debug, Clone, Default)]
pub struct SessionConfigDraft {
    pub difficulty: Option<Difficulty>,
    pub exercise_count: Option<f64>,
    pub reveal_interval: Option<Duration>,
    pub countdown_seconds: Option<u8>,
    pub metadata: ConfigMetadata,
}

impl SessionConfigDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp and normalize the draft into an immutable session config.
    #[must_use]
    pub fn build(self) -> SessionConfig {
        let difficulty = self.difficulty.unwrap_or_default();
        let exercise_count = self
            .exercise_count
            .map_or(DEFAULT_EXERCISE_COUNT, clamp_exercise_count);
        let reveal_interval = self
            .reveal_interval
            .unwrap_or_else(|| difficulty.reveal_interval());
        // The countdown runs from either 3 or 5; anything else normalizes.
        let countdown_seconds = match self.countdown_seconds {
            Some(value) if value >= 5 => 5,
            _ => DEFAULT_COUNTDOWN_SECONDS,
        };

        SessionConfig {
            difficulty,
            exercise_count,
            reveal_interval,
            countdown_seconds,
            metadata: self.metadata,
        }
    }
}

const DEFAULT_EXERCISE_COUNT: u8 = 3;
const DEFAULT_COUNTDOWN_SECONDS: u8 = 3;

fn clamp_exercise_count(raw: f64) -> u8 {
    if !raw.is_finite() {
        return DEFAULT_EXERCISE_COUNT;
    }
    let rounded = raw.round();
    if rounded < f64::from(MIN_EXERCISES) {
        MIN_EXERCISES
    } else if rounded > f64::from(MAX_EXERCISES) {
        MAX_EXERCISES
    } else {
        // In-range rounded f64 converts exactly.
        rounded as u8
    }
}

/// Immutable per-session configuration.
///
/// Created once from the config provider output merged over defaults, and
/// never changed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    difficulty: Difficulty,
    exercise_count: u8,
    reveal_interval: Duration,
    countdown_seconds: u8,
    metadata: ConfigMetadata,
}

impl SessionConfig {
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Requested number of exercises, already clamped to `1..=5`.
    #[must_use]
    pub fn exercise_count(&self) -> u8 {
        self.exercise_count
    }

    #[must_use]
    pub fn reveal_interval(&self) -> Duration {
        self.reveal_interval
    }

    /// Countdown start value: 3 or 5.
    #[must_use]
    pub fn countdown_seconds(&self) -> u8 {
        self.countdown_seconds
    }

    #[must_use]
    pub fn metadata(&self) -> &ConfigMetadata {
        &self.metadata
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfigDraft::new().build()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_basic_three_exercises_tier_speed() {
        let config = SessionConfig::default();
        assert_eq!(config.difficulty(), Difficulty::Basic);
        assert_eq!(config.exercise_count(), 3);
        assert_eq!(config.reveal_interval(), Duration::from_millis(1000));
        assert_eq!(config.countdown_seconds(), 3);
        assert!(config.metadata().author.is_none());
    }

    #[test]
    fn reveal_interval_follows_difficulty_unless_overridden() {
        let mut draft = SessionConfigDraft::new();
        draft.difficulty = Some(Difficulty::Advanced);
        assert_eq!(
            draft.clone().build().reveal_interval(),
            Duration::from_millis(600)
        );

        draft.reveal_interval = Some(Duration::from_millis(850));
        assert_eq!(draft.build().reveal_interval(), Duration::from_millis(850));
    }

    #[test]
    fn exercise_count_is_rounded_then_clamped() {
        let count = |raw: f64| {
            let mut draft = SessionConfigDraft::new();
            draft.exercise_count = Some(raw);
            draft.build().exercise_count()
        };

        assert_eq!(count(2.0), 2);
        assert_eq!(count(2.6), 3);
        assert_eq!(count(0.0), 1);
        assert_eq!(count(-4.0), 1);
        assert_eq!(count(7.0), 5);
        assert_eq!(count(f64::NAN), 3);
    }

    #[test]
    fn countdown_normalizes_to_three_or_five() {
        let countdown = |raw: u8| {
            let mut draft = SessionConfigDraft::new();
            draft.countdown_seconds = Some(raw);
            draft.build().countdown_seconds()
        };

        assert_eq!(countdown(3), 3);
        assert_eq!(countdown(5), 5);
        assert_eq!(countdown(4), 3);
        assert_eq!(countdown(10), 5);
        assert_eq!(countdown(0), 3);
    }
}
