//! Paced autoplay
//!
//! Drives [`BattleSession::step`] until the battle ends or is stopped.
//! Pacing goes through a [`Pacer`], so tests run without real time passing.
//! Stop and pause are cooperative: flags checked before every step and on
//! every poll of the pause wait.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::battle::session::{BattleSession, StepOutcome};
use crate::battle::state::BattleState;
use crate::core::error::Result;

/// Pause/resume/stop handle for one session's autoplay
///
/// Cloning shares the flags: the session keeps one copy, the presenting side
/// holds another.
#[derive(Debug, Clone, Default)]
pub struct AutoplayControls {
    paused: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
}

impl AutoplayControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Request a stop; honored before the next step
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Clear both flags after a run has ended
    fn reset(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.stopped.store(false, Ordering::SeqCst);
    }
}

/// Source of presentation delays
pub trait Pacer {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Real delays on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// No delay; only yields so other tasks (a controller, a renderer) get to run
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn wait(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

/// Receives autoplay progress for rendering
pub trait BattleObserver {
    /// Called after every discrete state change
    fn on_update(&mut self, _state: &BattleState) {}

    /// Called for every log line, in order
    fn on_log(&mut self, _line: &str) {}
}

impl BattleObserver for () {}

/// Observer that keeps everything it is told
#[derive(Debug, Clone, Default)]
pub struct LogRecorder {
    pub lines: Vec<String>,
    pub updates: usize,
    pub last_turn: Option<u32>,
}

impl BattleObserver for LogRecorder {
    fn on_update(&mut self, state: &BattleState) {
        self.updates += 1;
        self.last_turn = Some(state.turn);
    }

    fn on_log(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

fn announce<O: BattleObserver>(session: &mut BattleSession, observer: &mut O, line: &str) {
    session.record(line);
    observer.on_log(line);
    observer.on_update(session.state());
}

/// Run autoplay until the battle ends or a stop is requested
///
/// Returns the state at the end: terminal, or in progress when stopped.
/// Nothing already applied is undone by a stop.
pub async fn run_autoplay<P, O>(
    session: &mut BattleSession,
    pacer: &P,
    observer: &mut O,
) -> Result<BattleState>
where
    P: Pacer,
    O: BattleObserver,
{
    let controls = session.controls();
    let step_delay = Duration::from_millis(session.config().step_delay_ms);
    let poll_interval = Duration::from_millis(session.config().pause_poll_ms);
    let intro_delay = Duration::from_millis(session.config().intro_delay_ms);

    tracing::info!(battle = %session.id(), turn = session.state().turn, "autoplay started");
    announce(session, observer, "Autoplay engaged!");
    pacer.wait(intro_delay).await;

    let mut was_paused = false;
    loop {
        if controls.is_stopped() {
            announce(session, observer, "Autoplay stopped.");
            tracing::info!(battle = %session.id(), turn = session.state().turn, "autoplay stopped");
            break;
        }

        if controls.is_paused() {
            if !was_paused {
                was_paused = true;
                announce(session, observer, "Autoplay paused.");
            }
            pacer.wait(poll_interval).await;
            continue;
        }
        if was_paused {
            was_paused = false;
            announce(session, observer, "Autoplay resumed.");
        }

        let outcome = match session.step() {
            Ok(outcome) => outcome,
            Err(err) => {
                controls.reset();
                return Err(err);
            }
        };
        for line in outcome.lines() {
            observer.on_log(line);
        }
        observer.on_update(session.state());

        if let StepOutcome::Finished { winner, .. } = outcome {
            tracing::info!(battle = %session.id(), winner = %winner, "autoplay finished");
            break;
        }

        pacer.wait(step_delay).await;
    }

    controls.reset();
    Ok(session.state().clone())
}
