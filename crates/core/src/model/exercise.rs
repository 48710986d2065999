use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ExerciseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("operation must contain at least one token")]
    EmptyOperation,

    #[error("operation token {index} is empty")]
    EmptyToken { index: usize },

    #[error("exercise needs at least two answer options, got {count}")]
    TooFewOptions { count: usize },

    #[error("exercise must have exactly one correct option, got {count}")]
    CorrectOptionCount { count: usize },

    #[error("answer option {index} has empty text")]
    EmptyOptionText { index: usize },
}

//
// ─── ANSWER OPTION ─────────────────────────────────────────────────────────────
//

/// One selectable answer for an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    text: String,
    is_correct: bool,
}

impl AnswerOption {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// Unvalidated exercise data as authored in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub operation: Vec<String>,
    pub options: Vec<AnswerOption>,
}

impl ExerciseDraft {
    #[must_use]
    pub fn new(operation: Vec<String>, options: Vec<AnswerOption>) -> Self {
        Self { operation, options }
    }

    /// Validate the draft into an immutable exercise.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` when the operation is empty, a token or option
    /// text is blank, fewer than two options are present, or the number of
    /// correct options is not exactly one.
    pub fn validate(self, id: ExerciseId) -> Result<Exercise, ExerciseError> {
        if self.operation.is_empty() {
            return Err(ExerciseError::EmptyOperation);
        }
        for (index, token) in self.operation.iter().enumerate() {
            if token.trim().is_empty() {
                return Err(ExerciseError::EmptyToken { index });
            }
        }

        if self.options.len() < 2 {
            return Err(ExerciseError::TooFewOptions {
                count: self.options.len(),
            });
        }
        for (index, option) in self.options.iter().enumerate() {
            if option.text.trim().is_empty() {
                return Err(ExerciseError::EmptyOptionText { index });
            }
        }

        let correct = self.options.iter().filter(|o| o.is_correct).count();
        if correct != 1 {
            return Err(ExerciseError::CorrectOptionCount { count: correct });
        }

        Ok(Exercise {
            id,
            operation: self.operation,
            options: self.options,
        })
    }
}

/// An authored mental-arithmetic exercise.
///
/// The operation is an ordered sequence of display tokens (e.g. `7`, `+`,
/// `5`) revealed one at a time. Pool exercises are never mutated after load;
/// a session works on copies produced by [`Exercise::with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    operation: Vec<String>,
    options: Vec<AnswerOption>,
}

impl Exercise {
    #[must_use]
    pub fn id(&self) -> ExerciseId {
        self.id
    }

    #[must_use]
    pub fn operation(&self) -> &[String] {
        &self.operation
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Number of reveal steps for this exercise.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.operation.len()
    }

    /// Index of the single correct option.
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(AnswerOption::is_correct)
            .unwrap_or(0)
    }

    /// Returns a copy of this exercise with a reordered options sequence.
    ///
    /// The caller (the sampler) is responsible for passing a permutation of
    /// the original options; the source exercise is left untouched.
    #[must_use]
    pub fn with_options(&self, options: Vec<AnswerOption>) -> Self {
        Self {
            id: self.id,
            operation: self.operation.clone(),
            options,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
