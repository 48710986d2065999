//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{Difficulty, ExerciseError};

/// Errors emitted by a `ConfigSource` implementation.
///
/// All of these are recovered by `ConfigService::load`: a missing or broken
/// config document is a normal, non-fatal outcome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigSourceError {
    #[error("config document not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("config document unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Errors emitted by a `CatalogSource` implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogSourceError {
    #[error("catalog document not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("catalog document unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Errors emitted while loading the exercise catalogs.
///
/// Unlike config errors these are surfaced at startup: a malformed catalog
/// means there is nothing sensible to drill on. An *empty* tier is not an
/// error; the session simply ends immediately.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog for tier {tier} could not be fetched")]
    Source {
        tier: Difficulty,
        #[source]
        source: CatalogSourceError,
    },

    #[error("catalog for tier {tier} is not valid JSON")]
    Parse {
        tier: Difficulty,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid exercise at index {index} in tier {tier}")]
    Exercise {
        tier: Difficulty,
        index: usize,
        #[source]
        source: ExerciseError,
    },
}
