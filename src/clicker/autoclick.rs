//! Auto clicker scheduling.
//!
//! Scheduling is driven by frame timestamps (`performance.now()`), so the
//! whole machine is deterministic under test: feed it times, observe clicks.

use std::cell::Cell;
use std::rc::Rc;

use super::logic;
use super::state::Session;

/// Re-check delay while no auto clicker has been bought (ms).
pub const DORMANT_POLL_MS: f64 = 100.0;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A one-shot timer that the owner re-arms after every run, like a
/// `setTimeout` chain. There is no catch-up: a late poll fires once.
#[derive(Debug)]
pub struct RepeatingTask {
    due_ms: Option<f64>,
    token: CancelToken,
}

impl RepeatingTask {
    /// A task due immediately.
    pub fn new(token: CancelToken) -> Self {
        Self {
            due_ms: Some(f64::NEG_INFINITY),
            token,
        }
    }

    /// Whether the task is due at `now_ms`. A due task is disarmed until
    /// [`reschedule`](Self::reschedule) is called.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if self.token.is_cancelled() {
            self.due_ms = None;
            return false;
        }
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Arm the task to fire `delay_ms` after `now_ms`.
    pub fn reschedule(&mut self, now_ms: f64, delay_ms: f64) {
        if !self.token.is_cancelled() {
            self.due_ms = Some(now_ms + delay_ms);
        }
    }

    #[cfg(test)]
    pub fn due_ms(&self) -> Option<f64> {
        self.due_ms
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No auto clicker owned; waiting for the first purchase.
    Dormant,
    /// Clicking every `auto_interval_ms(level)`.
    Active,
}

/// Performs primary actions on a timer once an auto clicker is owned.
#[derive(Debug)]
pub struct AutoClicker {
    task: RepeatingTask,
    phase: Phase,
}

impl AutoClicker {
    pub fn new(token: CancelToken) -> Self {
        Self {
            task: RepeatingTask::new(token),
            phase: Phase::Dormant,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the task if it is due. Returns true when a click was performed.
    pub fn poll(&mut self, now_ms: f64, session: &mut Session) -> bool {
        if !self.task.poll(now_ms) {
            return false;
        }

        if session.auto_upgrade_level == 0 {
            self.phase = Phase::Dormant;
            self.task.reschedule(now_ms, DORMANT_POLL_MS);
            return false;
        }

        if self.phase == Phase::Dormant {
            log::info!("auto clicker active (level {})", session.auto_upgrade_level);
        }
        self.phase = Phase::Active;
        logic::click(session);
        let interval = logic::auto_interval_ms(session.auto_upgrade_level);
        self.task.reschedule(now_ms, interval as f64);
        true
    }
}
