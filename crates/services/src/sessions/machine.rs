use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::trace;

use drill_core::model::{Exercise, SessionConfig};
use drill_core::time::Clock;
use drill_core::ScoreTracker;

use super::messages;
use super::snapshot::{PhaseKind, SessionSnapshot};
use crate::sampler;

//
// ─── TIMING ────────────────────────────────────────────────────────────────────
//

/// Countdown decrements once per second.
pub const COUNTDOWN_TICK: Duration = Duration::from_millis(1000);
/// "¡Ahora!" window between countdown zero and the first exercise.
pub const COUNTDOWN_EXPIRY_GAP: Duration = Duration::from_millis(500);
/// Gap between the last revealed token and the answer options.
pub const OPTIONS_GAP: Duration = Duration::from_millis(500);
/// Delay between locking a selection and showing the feedback phrase.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(900);
/// How long the feedback phrase stays up.
pub const FEEDBACK_HOLD: Duration = Duration::from_millis(1500);
/// Quiet gap after the last feedback before the closing banner.
pub const CLOSING_DELAY: Duration = Duration::from_millis(600);
/// How long the closing banner stays up before the summary.
pub const CLOSING_HOLD: Duration = Duration::from_millis(1200);

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// External inputs forwarded by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Start,
    Select(usize),
    Pause,
    Resume,
    ExitToStart,
    Restart,
}

/// Internal timer expirations, one kind per scheduled delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    CountdownTick,
    CountdownExpired,
    RevealTick,
    OptionsReady,
    FeedbackShow,
    FeedbackElapsed,
    ClosingBanner,
    ClosingElapsed,
}

/// What the driver must do with its single outstanding timer after a
/// transition.
///
/// `Arm` replaces whatever was scheduled before, `Cancel` clears it, and
/// `Keep` leaves it untouched (the input was a guarded no-op). Because every
/// transition states its timer explicitly, a timer belonging to an exited
/// phase can never fire: cancel-on-exit is structural, not a cleanup chore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Keep,
    Cancel,
    Arm { delay: Duration, event: TimerEvent },
}

impl TimerCommand {
    fn arm(delay: Duration, event: TimerEvent) -> Self {
        Self::Arm { delay, event }
    }
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Sub-phase a pause interrupted and will return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PausedPhase {
    Countdown { value: u8 },
    Presenting,
    AwaitingAnswer,
}

/// The one tagged union describing where the session is.
///
/// Collapsing the phase into a single enum rules out the impossible flag
/// combinations a boolean-per-aspect model would allow (paused summary,
/// feedback during countdown, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    StartScreen,
    /// `value == 0` is the expiry window before the first exercise.
    Countdown {
        value: u8,
    },
    Presenting,
    AwaitingAnswer,
    /// `message` stays empty during the pre-delay after the selection.
    Feedback {
        selected: usize,
        correct: bool,
        message: Option<&'static str>,
    },
    /// End-of-session banner window.
    Closing {
        banner: bool,
    },
    Summary,
    Paused {
        resume: PausedPhase,
    },
}

//
// ─── MACHINE ───────────────────────────────────────────────────────────────────
//

/// The session state machine.
///
/// Owns the full mutable session state and serializes every mutation through
/// [`SessionMachine::apply_input`] / [`SessionMachine::apply_timer`]. The
/// machine itself is synchronous and deterministic given its generator; the
/// async driver in [`super::runtime`] arms the timers it asks for.
pub struct SessionMachine<R: Rng> {
    config: SessionConfig,
    clock: Clock,
    pool: Vec<Exercise>,
    exercises: Vec<Exercise>,
    current: usize,
    revealed: usize,
    tracker: ScoreTracker,
    phase: Phase,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    rng: R,
}

impl<R: Rng> SessionMachine<R> {
    /// Machine on the start screen, before any sampling has happened.
    ///
    /// `pool` is the exercise list for the configured tier; sampling draws
    /// from it on every start/restart.
    #[must_use]
    pub fn new(config: SessionConfig, pool: Vec<Exercise>, rng: R) -> Self {
        Self {
            config,
            clock: Clock::default(),
            pool,
            exercises: Vec::new(),
            current: 0,
            revealed: 0,
            tracker: ScoreTracker::new(0),
            phase: Phase::StartScreen,
            started_at: None,
            completed_at: None,
            rng,
        }
    }

    /// Replace the time source, for deterministic timestamps in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The sampled exercise list, fixed for the running session.
    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.tracker.max_score()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Apply a renderer-forwarded input. Invalid inputs for the current
    /// phase are silent no-ops (`Keep`), per the guard policy.
    pub fn apply_input(&mut self, input: PlayerInput) -> TimerCommand {
        trace!(?input, phase = ?self.phase, "player input");
        match (self.phase, input) {
            (Phase::StartScreen, PlayerInput::Start) => self.begin_session(),
            (Phase::Summary, PlayerInput::Restart) => self.begin_session(),

            (Phase::AwaitingAnswer, PlayerInput::Select(index)) => self.select(index),

            (Phase::Countdown { value }, PlayerInput::Pause) if value > 0 => {
                self.pause(PausedPhase::Countdown { value })
            }
            (Phase::Presenting, PlayerInput::Pause) => self.pause(PausedPhase::Presenting),
            (Phase::AwaitingAnswer, PlayerInput::Pause) => {
                self.pause(PausedPhase::AwaitingAnswer)
            }

            (Phase::Paused { resume }, PlayerInput::Resume) => self.resume(resume),

            (Phase::Paused { .. } | Phase::Summary, PlayerInput::ExitToStart) => {
                self.reset_to_start()
            }

            _ => TimerCommand::Keep,
        }
    }

    /// Apply a timer expiration. Events that do not match the current phase
    /// are ignored; the driver's single-timer discipline keeps them from
    /// occurring in the first place.
    pub fn apply_timer(&mut self, event: TimerEvent) -> TimerCommand {
        trace!(?event, phase = ?self.phase, "timer event");
        match (self.phase, event) {
            (Phase::Countdown { value }, TimerEvent::CountdownTick) if value > 0 => {
                let value = value - 1;
                self.phase = Phase::Countdown { value };
                if value > 0 {
                    TimerCommand::arm(COUNTDOWN_TICK, TimerEvent::CountdownTick)
                } else {
                    TimerCommand::arm(COUNTDOWN_EXPIRY_GAP, TimerEvent::CountdownExpired)
                }
            }

            (Phase::Countdown { value: 0 }, TimerEvent::CountdownExpired) => {
                if self.exercises.is_empty() {
                    // Nothing to drill on: skip straight to the summary.
                    self.finish()
                } else {
                    self.phase = Phase::Presenting;
                    self.revealed = 0;
                    TimerCommand::arm(self.config.reveal_interval(), TimerEvent::RevealTick)
                }
            }

            (Phase::Presenting, TimerEvent::RevealTick) => {
                self.revealed += 1;
                self.reveal_timer()
            }

            (Phase::Presenting, TimerEvent::OptionsReady) => {
                self.phase = Phase::AwaitingAnswer;
                TimerCommand::Cancel
            }

            (
                Phase::Feedback {
                    selected,
                    correct,
                    message: None,
                },
                TimerEvent::FeedbackShow,
            ) => {
                let message = messages::pick_feedback(correct, &mut self.rng);
                self.phase = Phase::Feedback {
                    selected,
                    correct,
                    message: Some(message),
                };
                TimerCommand::arm(FEEDBACK_HOLD, TimerEvent::FeedbackElapsed)
            }

            (
                Phase::Feedback {
                    message: Some(_), ..
                },
                TimerEvent::FeedbackElapsed,
            ) => self.advance(),

            (Phase::Closing { banner: false }, TimerEvent::ClosingBanner) => {
                self.phase = Phase::Closing { banner: true };
                TimerCommand::arm(CLOSING_HOLD, TimerEvent::ClosingElapsed)
            }

            (Phase::Closing { banner: true }, TimerEvent::ClosingElapsed) => self.finish(),

            _ => TimerCommand::Keep,
        }
    }

    fn begin_session(&mut self) -> TimerCommand {
        self.exercises = sampler::sample(
            &self.pool,
            usize::from(self.config.exercise_count()),
            &mut self.rng,
        );
        self.current = 0;
        self.revealed = 0;
        self.tracker.reset(self.exercises.len());
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        self.phase = Phase::Countdown {
            value: self.config.countdown_seconds(),
        };
        TimerCommand::arm(COUNTDOWN_TICK, TimerEvent::CountdownTick)
    }

    fn select(&mut self, index: usize) -> TimerCommand {
        let Some(exercise) = self.exercises.get(self.current) else {
            return TimerCommand::Keep;
        };
        let Some(option) = exercise.options().get(index) else {
            return TimerCommand::Keep;
        };

        let correct = option.is_correct();
        self.tracker.record(correct);
        self.phase = Phase::Feedback {
            selected: index,
            correct,
            message: None,
        };
        TimerCommand::arm(FEEDBACK_DELAY, TimerEvent::FeedbackShow)
    }

    fn pause(&mut self, resume: PausedPhase) -> TimerCommand {
        self.phase = Phase::Paused { resume };
        TimerCommand::Cancel
    }

    /// Re-arm the interrupted phase at full interval length: partial elapsed
    /// time within an interval is deliberately not preserved across a pause.
    fn resume(&mut self, resume: PausedPhase) -> TimerCommand {
        match resume {
            PausedPhase::Countdown { value } => {
                self.phase = Phase::Countdown { value };
                TimerCommand::arm(COUNTDOWN_TICK, TimerEvent::CountdownTick)
            }
            PausedPhase::Presenting => {
                self.phase = Phase::Presenting;
                self.reveal_timer()
            }
            PausedPhase::AwaitingAnswer => {
                self.phase = Phase::AwaitingAnswer;
                TimerCommand::Cancel
            }
        }
    }

    fn advance(&mut self) -> TimerCommand {
        if self.current + 1 < self.exercises.len() {
            self.current += 1;
            self.revealed = 0;
            self.phase = Phase::Presenting;
            TimerCommand::arm(self.config.reveal_interval(), TimerEvent::RevealTick)
        } else {
            self.phase = Phase::Closing { banner: false };
            TimerCommand::arm(CLOSING_DELAY, TimerEvent::ClosingBanner)
        }
    }

    fn finish(&mut self) -> TimerCommand {
        self.phase = Phase::Summary;
        self.completed_at = Some(self.clock.now());
        TimerCommand::Cancel
    }

    fn reset_to_start(&mut self) -> TimerCommand {
        self.exercises.clear();
        self.current = 0;
        self.revealed = 0;
        self.tracker.reset(0);
        self.started_at = None;
        self.completed_at = None;
        self.phase = Phase::StartScreen;
        TimerCommand::Cancel
    }

    /// Timer for the presenting phase: next token, or the options gap once
    /// every token is out.
    fn reveal_timer(&self) -> TimerCommand {
        let tokens = self.current_exercise().map_or(0, Exercise::token_count);
        if self.revealed < tokens {
            TimerCommand::arm(self.config.reveal_interval(), TimerEvent::RevealTick)
        } else {
            TimerCommand::arm(OPTIONS_GAP, TimerEvent::OptionsReady)
        }
    }

    //
    // ─── SNAPSHOT ──────────────────────────────────────────────────────────────
    //

    /// Read-only snapshot of the current state for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let (effective, is_paused) = match self.phase {
            Phase::Paused { resume } => (
                match resume {
                    PausedPhase::Countdown { value } => Phase::Countdown { value },
                    PausedPhase::Presenting => Phase::Presenting,
                    PausedPhase::AwaitingAnswer => Phase::AwaitingAnswer,
                },
                true,
            ),
            other => (other, false),
        };

        let phase = match effective {
            Phase::StartScreen => PhaseKind::StartScreen,
            Phase::Countdown { .. } => PhaseKind::Countdown,
            Phase::Presenting => PhaseKind::Presenting,
            Phase::AwaitingAnswer => PhaseKind::AwaitingAnswer,
            Phase::Feedback { .. } => PhaseKind::Feedback,
            Phase::Closing { .. } => PhaseKind::Closing,
            Phase::Summary => PhaseKind::Summary,
            Phase::Paused { .. } => PhaseKind::StartScreen,
        };

        let countdown = match effective {
            Phase::Countdown { value } => Some(value),
            _ => None,
        };

        let display_text = match effective {
            Phase::Countdown { value: 0 } => Some(messages::COUNTDOWN_GO.to_string()),
            Phase::Presenting if self.revealed > 0 => self
                .current_exercise()
                .and_then(|e| e.operation().get(self.revealed - 1))
                .cloned(),
            Phase::AwaitingAnswer | Phase::Feedback { .. } => {
                Some(messages::READY_MESSAGE.to_string())
            }
            _ => None,
        };

        let options_visible = matches!(
            effective,
            Phase::AwaitingAnswer | Phase::Feedback { .. }
        );
        let options = if options_visible {
            self.current_exercise()
                .map(|e| e.options().iter().map(|o| o.text().to_string()).collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let selected_option = match effective {
            Phase::Feedback { selected, .. } => Some(selected),
            _ => None,
        };

        let feedback = match effective {
            Phase::Feedback {
                message: Some(message),
                ..
            } => Some(message.to_string()),
            Phase::Closing { banner: true } => Some(messages::CLOSING_MESSAGE.to_string()),
            _ => None,
        };

        let summary = match effective {
            Phase::Summary => Some(self.tracker.summary()),
            _ => None,
        };

        SessionSnapshot {
            phase,
            is_paused,
            countdown,
            display_text,
            options,
            selected_option,
            feedback,
            exercise_number: if self.exercises.is_empty() {
                0
            } else {
                self.current + 1
            },
            exercise_total: self.exercises.len(),
            score: self.tracker.score(),
            max_score: self.tracker.max_score(),
            summary,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
