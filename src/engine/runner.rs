//! Async driver for the session controller.
//!
//! This module provides:
//! - A fixed-rate 10 ms ticker built on `tokio::time::interval`
//! - Command handling (start, pause/resume, end, reset) over an mpsc channel
//! - Forwarding of session events to the UI layer

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::session::{SessionController, SessionEvent};
use super::timer::TICK_QUANTUM;
use crate::types::{TimingConfig, WorkoutPlan};

// ============================================================================
// EngineCommand
// ============================================================================

/// Commands accepted by the running engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Load a workout and begin the pre-workout countdown
    Start(WorkoutPlan),
    /// Pause or resume the countdown
    ToggleRunning,
    /// End the workout early
    End,
    /// Clear the session back to idle
    Reset,
}

// ============================================================================
// WorkoutEngine
// ============================================================================

/// Owns the session controller and feeds it ticks and commands.
pub struct WorkoutEngine {
    session: SessionController,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl WorkoutEngine {
    /// Creates an idle engine that reports to `event_tx`.
    pub fn new(timing: TimingConfig, event_tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self {
            session: SessionController::new(timing),
            event_tx,
        }
    }

    /// Runs the tick loop until the command channel is closed.
    ///
    /// Ticks and commands are handled on this one task, and the ticker is
    /// re-armed whenever a countdown is (re)started, so no tick scheduled for
    /// a previous countdown reaches the session. Each tick is stamped with the
    /// epoch current when it is handled; the controller's epoch check only
    /// rejects ticks from callers that hold an older stamp.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<EngineCommand>) -> Result<()> {
        let mut ticker = interval(TICK_QUANTUM);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let epoch = self.session.epoch();
                    let events = self.session.on_tick(epoch);
                    self.emit(events)?;
                }
                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("Command channel closed, stopping engine");
                        return Ok(());
                    };
                    if self.handle_command(command)? {
                        ticker.reset();
                    }
                }
            }
        }
    }

    /// Applies a command; returns true if the countdown was (re)started.
    pub fn handle_command(&mut self, command: EngineCommand) -> Result<bool> {
        debug!(?command, "Handling engine command");

        let events = match command {
            EngineCommand::Start(plan) => self.session.start(plan),
            EngineCommand::ToggleRunning => self.session.toggle_running(),
            EngineCommand::End => self.session.end(),
            EngineCommand::Reset => self.session.reset(),
        };

        let restarted = events.iter().any(|event| {
            matches!(
                event,
                SessionEvent::Started { .. } | SessionEvent::Resumed | SessionEvent::Reset
            )
        });

        self.emit(events)?;
        Ok(restarted)
    }

    fn emit(&self, events: Vec<SessionEvent>) -> Result<()> {
        for event in events {
            self.event_tx
                .send(event)
                .context("Failed to send session event")?;
        }
        Ok(())
    }

    /// Returns a reference to the session (for tests and queries).
    pub fn session(&self) -> &SessionController {
        &self.session
    }
}

// ============================================================================
// Tests
// ============================================================================
