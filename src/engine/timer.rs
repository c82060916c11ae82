//! Countdown primitive driven by fixed 10 ms ticks.
//!
//! The timer knows nothing about workout phases: it counts a duration down,
//! reports expiry, and expects its owner to reload the next duration before
//! the following tick.

use std::time::Duration;

use tracing::debug;

/// Fixed granularity of the countdown.
pub const TICK_QUANTUM: Duration = Duration::from_millis(10);

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is stopped, or the tick belonged to an earlier epoch
    Idle,
    /// Time was subtracted and the countdown continues
    Counting,
    /// The countdown reached its end on this tick
    Expired,
}

/// Countdown timer with pause/resume and epoch-based tick invalidation.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    /// Full duration of the current phase
    duration: Duration,
    /// Time left in the current phase
    remaining: Duration,
    /// Whether ticks count down
    running: bool,
    /// Bumped on every re-initialization
    epoch: u64,
}

impl IntervalTimer {
    /// Creates a stopped timer with nothing on the clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-initializes the timer for a new phase.
    ///
    /// Sets `remaining` to the full duration and stops the timer; it only
    /// counts again after an explicit `start`.
    pub fn reset(&mut self, duration: Duration) {
        self.duration = duration;
        self.remaining = duration;
        self.running = false;
        self.epoch += 1;
        debug!(epoch = self.epoch, ?duration, "Timer reset");
    }

    /// Loads the next phase after an expiry, keeping the running state.
    pub fn reload(&mut self, duration: Duration) {
        self.duration = duration;
        self.remaining = duration;
        self.epoch += 1;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Sets the running flag; `remaining` is frozen while stopped.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Flips the running flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Advances the countdown by one quantum.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        if self.remaining <= TICK_QUANTUM {
            self.remaining = Duration::ZERO;
            return TickOutcome::Expired;
        }

        self.remaining -= TICK_QUANTUM;
        TickOutcome::Counting
    }

    /// Advances the countdown only if the tick was scheduled in the current epoch.
    pub fn tick_for(&mut self, epoch: u64) -> TickOutcome {
        if epoch != self.epoch {
            debug!(stale = epoch, current = self.epoch, "Discarding stale tick");
            return TickOutcome::Idle;
        }
        self.tick()
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

// ============================================================================
// Tests
// ============================================================================
