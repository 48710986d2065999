use std::pin::Pin;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Sleep, sleep};
use tracing::{debug, trace};

use drill_core::model::{Exercise, SessionConfig};

use super::machine::{PlayerInput, SessionMachine, TimerCommand, TimerEvent};
use super::snapshot::SessionSnapshot;

const INPUT_CHANNEL_CAPACITY: usize = 16;

/// Owns a [`SessionMachine`] on a dedicated task and drives its timers.
///
/// All mutation is serialized on the task: inputs arrive over an mpsc
/// channel, timer expirations come from the single outstanding sleep, and
/// after every transition the fresh snapshot is published on a watch
/// channel. One timer at a time means an event armed in an exited phase
/// cannot fire later; pausing or leaving a phase drops the sleep with it.
pub struct SessionRuntime {
    inputs: mpsc::Receiver<PlayerInput>,
    snapshots: watch::Sender<SessionSnapshot>,
    machine: SessionMachine<StdRng>,
    pending: Option<(Pin<Box<Sleep>>, TimerEvent)>,
}

/// Cheap clonable handle to a running session task.
#[derive(Clone)]
pub struct SessionHandle {
    inputs: mpsc::Sender<PlayerInput>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Forward a player input to the session task.
    ///
    /// Inputs sent after the task stopped are dropped silently; the session
    /// is gone either way.
    pub async fn send(&self, input: PlayerInput) {
        if self.inputs.send(input).await.is_err() {
            debug!(?input, "session task is gone; input dropped");
        }
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }
}

impl SessionRuntime {
    /// Spawn the session task and hand back its handle.
    ///
    /// `seed` fixes the sampling and feedback-phrase generator; `None` draws
    /// operating-system entropy.
    #[must_use]
    pub fn spawn(
        config: SessionConfig,
        pool: Vec<Exercise>,
        seed: Option<u64>,
    ) -> (SessionHandle, JoinHandle<()>) {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let machine = SessionMachine::new(config, pool, rng);

        let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());

        let runtime = Self {
            inputs: input_rx,
            snapshots: snapshot_tx,
            machine,
            pending: None,
        };
        let task = tokio::spawn(runtime.run());

        (
            SessionHandle {
                inputs: input_tx,
                snapshots: snapshot_rx,
            },
            task,
        )
    }

    async fn run(mut self) {
        debug!("session task started");
        loop {
            match self.wait().await {
                Waited::Input(input) => {
                    let command = self.machine.apply_input(input);
                    self.settle(command);
                }
                Waited::Timer(event) => {
                    self.pending = None;
                    let command = self.machine.apply_timer(event);
                    self.settle(command);
                }
                Waited::Closed => break,
            }
        }
        debug!("session task stopped");
    }

    /// Wait for the next thing to happen: the armed timer (if any) or an
    /// input. Channel closure ends the task.
    async fn wait(&mut self) -> Waited {
        if let Some((sleep, event)) = self.pending.as_mut() {
            let event = *event;
            tokio::select! {
                () = sleep.as_mut() => Waited::Timer(event),
                input = self.inputs.recv() => match input {
                    Some(input) => Waited::Input(input),
                    None => Waited::Closed,
                },
            }
        } else {
            match self.inputs.recv().await {
                Some(input) => Waited::Input(input),
                None => Waited::Closed,
            }
        }
    }

    /// Apply the machine's timer command and publish the new snapshot.
    fn settle(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Keep => {}
            TimerCommand::Cancel => self.pending = None,
            TimerCommand::Arm { delay, event } => {
                trace!(?event, ?delay, "arming timer");
                self.pending = Some((Box::pin(sleep(delay)), event));
            }
        }
        // Publishing only fails without subscribers, which is fine.
        let _ = self.snapshots.send(self.machine.snapshot());
    }
}

enum Waited {
    Input(PlayerInput),
    Timer(TimerEvent),
    Closed,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::snapshot::PhaseKind;
    use drill_core::model::{AnswerOption, ExerciseDraft, ExerciseId};

    fn pool(size: u64) -> Vec<Exercise> {
        (1..=size)
            .map(|id| {
                ExerciseDraft::new(
                    vec![id.to_string(), "+".into(), "2".into()],
                    vec![
                        AnswerOption::new((id + 2).to_string(), true),
                        AnswerOption::new(id.to_string(), false),
                    ],
                )
                .validate(ExerciseId::new(id))
                .unwrap()
            })
            .collect()
    }

    async fn wait_for(
        snapshots: &mut watch::Receiver<SessionSnapshot>,
        mut stop: impl FnMut(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        loop {
            {
                let current = snapshots.borrow_and_update();
                if stop(&current) {
                    return current.clone();
                }
            }
            snapshots.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn initial_snapshot_is_the_start_screen() {
        let (handle, task) = SessionRuntime::spawn(SessionConfig::default(), pool(4), Some(7));
        assert_eq!(handle.snapshot().phase, PhaseKind::StartScreen);
        drop(handle);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn start_runs_countdown_and_reveal_to_answering() {
        let (handle, task) = SessionRuntime::spawn(SessionConfig::default(), pool(4), Some(7));
        let mut snapshots = handle.subscribe();

        handle.send(PlayerInput::Start).await;
        let began = tokio::time::Instant::now();
        // Answering is the first phase with no armed timer, so the watch
        // channel cannot coalesce past it.
        let snapshot =
            wait_for(&mut snapshots, |s| s.phase == PhaseKind::AwaitingAnswer).await;
        assert_eq!(snapshot.exercise_number, 1);
        assert_eq!(snapshot.options.len(), 2);

        // Countdown (3 s + 500 ms), three token reveals at 1 s each, and
        // the 500 ms options gap.
        assert!(began.elapsed() >= std::time::Duration::from_millis(7000));

        drop(handle);
        drop(snapshots);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn task_stops_when_the_handle_is_dropped() {
        let (handle, task) = SessionRuntime::spawn(SessionConfig::default(), pool(4), Some(7));
        handle.send(PlayerInput::Start).await;
        drop(handle);
        task.await.unwrap();
    }
}
