//! The timed drill session: state machine, timer-driving task, snapshots.

mod machine;
mod messages;
mod runtime;
mod snapshot;

pub use machine::{
    CLOSING_DELAY, CLOSING_HOLD, COUNTDOWN_EXPIRY_GAP, COUNTDOWN_TICK, FEEDBACK_DELAY,
    FEEDBACK_HOLD, OPTIONS_GAP, PlayerInput, SessionMachine, TimerCommand, TimerEvent,
};
pub use messages::{
    CLOSING_MESSAGE, COUNTDOWN_GO, READY_MESSAGE, SUMMARY_TITLE_MAJORITY, SUMMARY_TITLE_RETRY,
    summary_title,
};
pub use runtime::{SessionHandle, SessionRuntime};
pub use snapshot::{PhaseKind, SessionSnapshot};
