use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use drill_core::model::{AnswerOption, Difficulty, ExerciseDraft, ExerciseId, ExercisePool};

use crate::error::{CatalogError, CatalogSourceError};

/// Supplies the raw per-tier exercise catalog documents.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the raw JSON catalog for a tier.
    ///
    /// # Errors
    ///
    /// Returns `CatalogSourceError` when the document cannot be obtained.
    /// `NotFound` is treated by the loader as an empty tier; other failures
    /// surface at startup.
    async fn fetch(&self, tier: Difficulty) -> Result<String, CatalogSourceError>;
}

//
// ─── DOCUMENT ──────────────────────────────────────────────────────────────────
//

/// One catalog entry: a comma-separated operation and its answer options.
#[derive(Debug, Clone, Deserialize)]
struct CatalogRow {
    operation: String,
    options: Vec<OptionRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct OptionRow {
    text: String,
    #[serde(rename = "isCorrect")]
    is_correct: bool,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Loads the exercise catalogs into a read-only [`ExercisePool`].
///
/// Runs once at startup. Operations are split on commas into display tokens
/// (`"7,+,5"` → `["7", "+", "5"]`) and every entry is validated; ids are
/// assigned sequentially across tiers.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Load all three tier catalogs into a pool.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when a document cannot be fetched (other than
    /// not existing), is not valid JSON, or contains an invalid exercise.
    pub async fn load_pool(&self) -> Result<ExercisePool, CatalogError> {
        let mut pool = ExercisePool::new();
        let mut next_id = 1_u64;

        for tier in Difficulty::ALL {
            let raw = match self.source.fetch(tier).await {
                Ok(raw) => raw,
                Err(CatalogSourceError::NotFound) => {
                    warn!(%tier, "no catalog document; tier stays empty");
                    continue;
                }
                Err(source) => return Err(CatalogError::Source { tier, source }),
            };

            let rows: Vec<CatalogRow> = serde_json::from_str(&raw)
                .map_err(|source| CatalogError::Parse { tier, source })?;

            let mut exercises = Vec::with_capacity(rows.len());
            for (index, row) in rows.into_iter().enumerate() {
                let operation = row
                    .operation
                    .split(',')
                    .map(|token| token.trim().to_string())
                    .collect();
                let options = row
                    .options
                    .into_iter()
                    .map(|o| AnswerOption::new(o.text, o.is_correct))
                    .collect();

                let exercise = ExerciseDraft::new(operation, options)
                    .validate(ExerciseId::new(next_id))
                    .map_err(|source| CatalogError::Exercise {
                        tier,
                        index,
                        source,
                    })?;
                next_id += 1;
                exercises.push(exercise);
            }

            debug!(%tier, count = exercises.len(), "loaded exercise catalog");
            pool.extend_tier(tier, exercises);
        }

        Ok(pool)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
