mod config;
mod exercise;
mod ids;
mod pool;
mod tier;

pub use config::{
    ConfigMetadata, MAX_EXERCISES, MIN_EXERCISES, SessionConfig, SessionConfigDraft,
};
pub use exercise::{AnswerOption, Exercise, ExerciseDraft, ExerciseError};
pub use ids::{ExerciseId, ParseIdError};
pub use pool::ExercisePool;
pub use tier::Difficulty;
