use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Difficulty tier for an exercise catalog.
///
/// Each tier owns its own exercise pool and its own reveal speed: harder
/// tiers flash the operation tokens faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All tiers, in ascending difficulty order.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Delay between two consecutive operation tokens during the reveal.
    #[must_use]
    pub fn reveal_interval(self) -> Duration {
        match self {
            Difficulty::Basic => Duration::from_millis(1000),
            Difficulty::Intermediate => Duration::from_millis(800),
            Difficulty::Advanced => Duration::from_millis(600),
        }
    }

    /// Maps a free-form difficulty name onto a tier, if recognized.
    ///
    /// Accepts Spanish and English synonyms, case-insensitively.
    #[must_use]
    pub fn try_from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "basico" | "básico" | "basic" => Some(Difficulty::Basic),
            "intermedio" | "intermediate" => Some(Difficulty::Intermediate),
            "avanzado" | "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Like [`Difficulty::try_from_name`], with unrecognized names falling
    /// back to `Basic`. There is no error path for a config author to
    /// observe, so the fallback is silent at this level.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::try_from_name(name).unwrap_or_default()
    }

    /// Canonical lowercase name of this tier.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
