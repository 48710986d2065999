#![forbid(unsafe_code)]

pub mod model;
pub mod scoring;
pub mod time;

pub use scoring::{POINTS_PER_CORRECT, ScoreTracker, SessionSummary};
pub use time::Clock;
