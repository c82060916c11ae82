//! Session controller: the workout phase state machine.
//!
//! This module provides:
//! - Phase transitions (PreWorkout → Exercising ⇄ Resting/LongPausing → Complete)
//! - A cursor into the generated sequence
//! - Countdown warning and cue signals during the last seconds of an exercise
//! - Session statistics for the completion summary

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use super::timer::{IntervalTimer, TickOutcome};
use crate::types::{Cue, Exercise, Phase, SequenceItem, TimingConfig, WorkoutPlan};

/// Remaining exercise time at which the warning becomes active.
pub const WARNING_THRESHOLD: Duration = Duration::from_secs(5);

// ============================================================================
// SessionEvent
// ============================================================================

/// Events produced by the controller for the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A workout was loaded and the pre-workout countdown started
    Started {
        /// Number of exercises in the workout
        total_exercises: usize,
    },
    /// The session entered a new phase
    PhaseChanged {
        /// New phase
        phase: Phase,
        /// Cursor into the sequence
        cursor: usize,
    },
    /// An exercise ran to the end of its countdown
    ExerciseCompleted {
        /// Exercises finished so far
        completed: u32,
    },
    /// The countdown advanced
    Tick {
        /// Time left in the current phase
        remaining: Duration,
    },
    /// The last-seconds warning was switched on or off
    WarningChanged {
        /// Whether the warning is now active
        active: bool,
    },
    /// A countdown beep is due
    Cue(Cue),
    /// The countdown was paused
    Paused,
    /// The countdown was resumed
    Resumed,
    /// The workout finished or was ended
    Completed(SessionSummary),
    /// The session was cleared back to idle
    Reset,
}

// ============================================================================
// SessionSummary
// ============================================================================

/// Statistics of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Exercises that ran to the end of their countdown
    pub completed_exercises: u32,
    /// Exercises in the generated sequence
    pub total_exercises: u32,
    /// Wall-clock length of the session in seconds
    pub actual_duration_seconds: u64,
    /// Display label of the difficulty
    pub difficulty_label: String,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
}

impl SessionSummary {
    /// Returns true if every exercise of the workout was finished.
    pub fn is_full_workout(&self) -> bool {
        self.completed_exercises == self.total_exercises
    }
}

// ============================================================================
// SessionController
// ============================================================================

/// Drives a generated workout through its phases.
#[derive(Debug, Clone)]
pub struct SessionController {
    timing: TimingConfig,
    plan: WorkoutPlan,
    cursor: usize,
    phase: Phase,
    timer: IntervalTimer,
    /// Duration of the long pause currently running
    pause_duration_override: Option<Duration>,
    started_at: Option<DateTime<Local>>,
    ended_at: Option<DateTime<Local>>,
    completed_exercises: u32,
    warning_active: bool,
    /// Lowest whole second a cue was emitted for in the current exercise
    last_cue_second: Option<u64>,
}

impl SessionController {
    /// Creates an idle controller with the given phase timing.
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            plan: WorkoutPlan::default(),
            cursor: 0,
            phase: Phase::Idle,
            timer: IntervalTimer::new(),
            pause_duration_override: None,
            started_at: None,
            ended_at: None,
            completed_exercises: 0,
            warning_active: false,
            last_cue_second: None,
        }
    }

    /// Loads a workout and starts the pre-workout countdown.
    ///
    /// Ignored while a session is active; allowed from `Idle` and `Complete`.
    pub fn start(&mut self, plan: WorkoutPlan) -> Vec<SessionEvent> {
        if self.phase.is_active() {
            debug!(phase = self.phase.as_str(), "Ignoring start while session is active");
            return Vec::new();
        }

        let total_exercises = plan.total_exercises();
        self.plan = plan;
        self.cursor = 0;
        self.completed_exercises = 0;
        self.pause_duration_override = None;
        self.started_at = Some(Local::now());
        self.ended_at = None;
        self.warning_active = false;
        self.last_cue_second = None;

        self.phase = Phase::PreWorkout;
        self.timer.reset(self.timing.pre_workout());
        self.timer.start();

        info!(
            difficulty = %self.plan.difficulty_label,
            exercises = total_exercises,
            items = self.plan.sequence.len(),
            "Workout started"
        );

        vec![
            SessionEvent::Started { total_exercises },
            SessionEvent::PhaseChanged {
                phase: Phase::PreWorkout,
                cursor: 0,
            },
        ]
    }

    /// Pauses or resumes the countdown of an active session.
    pub fn toggle_running(&mut self) -> Vec<SessionEvent> {
        if !self.phase.is_active() {
            return Vec::new();
        }

        if self.timer.toggle() {
            debug!(remaining = ?self.timer.remaining(), "Session resumed");
            vec![SessionEvent::Resumed]
        } else {
            debug!(remaining = ?self.timer.remaining(), "Session paused");
            vec![SessionEvent::Paused]
        }
    }

    /// Ends an active session early.
    ///
    /// Only exercises that ran to the end of their countdown are counted; an
    /// exercise interrupted midway is not.
    pub fn end(&mut self) -> Vec<SessionEvent> {
        if !self.phase.is_active() {
            return Vec::new();
        }

        info!(
            phase = self.phase.as_str(),
            completed = self.completed_exercises,
            "Workout ended early"
        );

        let mut events = Vec::new();
        self.cursor = 0;
        self.finish(&mut events);
        events
    }

    /// Clears the session back to idle.
    pub fn reset(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.clear_warning(&mut events);

        self.plan = WorkoutPlan::default();
        self.cursor = 0;
        self.phase = Phase::Idle;
        self.pause_duration_override = None;
        self.started_at = None;
        self.ended_at = None;
        self.completed_exercises = 0;
        self.last_cue_second = None;
        self.timer.reset(Duration::ZERO);

        debug!("Session reset");
        events.push(SessionEvent::Reset);
        events
    }

    /// Advances the countdown by one tick scheduled in `epoch`.
    ///
    /// Ticks from an earlier epoch are ignored and never mutate the session.
    pub fn on_tick(&mut self, epoch: u64) -> Vec<SessionEvent> {
        if !self.phase.is_active() {
            return Vec::new();
        }

        match self.timer.tick_for(epoch) {
            TickOutcome::Idle => Vec::new(),
            TickOutcome::Counting => {
                let mut events = vec![SessionEvent::Tick {
                    remaining: self.timer.remaining(),
                }];
                self.update_countdown(&mut events);
                events
            }
            TickOutcome::Expired => {
                let mut events = self.handle_expire();
                if self.phase.is_active() {
                    events.push(SessionEvent::Tick {
                        remaining: self.timer.remaining(),
                    });
                }
                events
            }
        }
    }

    /// Decides the next phase when the current countdown expires.
    fn handle_expire(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        match self.phase {
            Phase::PreWorkout => {
                self.cursor = 0;
                self.enter_current_item(&mut events);
            }
            Phase::Exercising => {
                self.completed_exercises += 1;
                events.push(SessionEvent::ExerciseCompleted {
                    completed: self.completed_exercises,
                });
                self.clear_warning(&mut events);

                match self.plan.sequence.get(self.cursor + 1) {
                    None => {
                        self.cursor = 0;
                        self.finish(&mut events);
                    }
                    Some(SequenceItem::Pause { .. }) => {
                        self.cursor += 1;
                        self.enter_current_item(&mut events);
                    }
                    Some(SequenceItem::Exercise { .. }) => {
                        let rest = self.timing.rest();
                        self.enter(Phase::Resting, rest, &mut events);
                    }
                }
            }
            Phase::Resting | Phase::LongPausing => {
                self.cursor += 1;
                self.enter_current_item(&mut events);
            }
            Phase::Idle | Phase::Complete => {}
        }

        events
    }

    /// Enters the phase matching the item under the cursor.
    fn enter_current_item(&mut self, events: &mut Vec<SessionEvent>) {
        match self.plan.sequence.get(self.cursor) {
            Some(SequenceItem::Exercise { .. }) => {
                self.pause_duration_override = None;
                let exercise = self.timing.exercise();
                self.enter(Phase::Exercising, exercise, events);
            }
            Some(SequenceItem::Pause { duration }) => {
                let duration = duration.as_duration();
                self.pause_duration_override = Some(duration);
                self.enter(Phase::LongPausing, duration, events);
            }
            None => {
                self.cursor = 0;
                self.finish(events);
            }
        }
    }

    fn enter(&mut self, phase: Phase, duration: Duration, events: &mut Vec<SessionEvent>) {
        self.phase = phase;
        self.timer.reload(duration);
        self.last_cue_second = None;

        debug!(
            phase = phase.as_str(),
            cursor = self.cursor,
            ?duration,
            "Phase changed"
        );
        events.push(SessionEvent::PhaseChanged {
            phase,
            cursor: self.cursor,
        });
    }

    fn finish(&mut self, events: &mut Vec<SessionEvent>) {
        self.clear_warning(events);
        self.phase = Phase::Complete;
        self.pause_duration_override = None;
        self.ended_at = Some(Local::now());
        self.timer.reset(Duration::ZERO);

        events.push(SessionEvent::PhaseChanged {
            phase: Phase::Complete,
            cursor: self.cursor,
        });
        if let Some(summary) = self.summary() {
            info!(
                completed = summary.completed_exercises,
                total = summary.total_exercises,
                seconds = summary.actual_duration_seconds,
                "Workout complete"
            );
            events.push(SessionEvent::Completed(summary));
        }
    }

    /// Updates the warning flag and emits countdown cues for the current exercise.
    fn update_countdown(&mut self, events: &mut Vec<SessionEvent>) {
        if self.phase != Phase::Exercising {
            return;
        }

        let remaining = self.timer.remaining();
        let warning = remaining <= WARNING_THRESHOLD && !remaining.is_zero();
        if warning != self.warning_active {
            self.warning_active = warning;
            events.push(SessionEvent::WarningChanged { active: warning });
        }
        if !warning {
            return;
        }

        let second = (remaining.as_millis() as u64).div_ceil(1000);
        if self.last_cue_second.is_some_and(|last| last <= second) {
            return;
        }
        if let Some(cue) = Cue::for_second(second) {
            self.last_cue_second = Some(second);
            events.push(SessionEvent::Cue(cue));
        }
    }

    fn clear_warning(&mut self, events: &mut Vec<SessionEvent>) {
        if self.warning_active {
            self.warning_active = false;
            events.push(SessionEvent::WarningChanged { active: false });
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_warning(&self) -> bool {
        self.warning_active
    }

    /// Epoch of the current countdown; ticks must be stamped with it.
    pub fn epoch(&self) -> u64 {
        self.timer.epoch()
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn sequence(&self) -> &[SequenceItem] {
        &self.plan.sequence
    }

    pub fn difficulty_label(&self) -> &str {
        &self.plan.difficulty_label
    }

    pub fn completed_exercise_count(&self) -> u32 {
        self.completed_exercises
    }

    /// Duration of the running long pause, if any.
    pub fn pause_duration_override(&self) -> Option<Duration> {
        self.pause_duration_override
    }

    pub fn total_exercises(&self) -> usize {
        self.plan.total_exercises()
    }

    /// Item under the cursor once the workout itself has begun.
    pub fn current_item(&self) -> Option<&SequenceItem> {
        match self.phase {
            Phase::Exercising | Phase::Resting | Phase::LongPausing => {
                self.plan.sequence.get(self.cursor)
            }
            _ => None,
        }
    }

    /// Exercise being performed right now.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        match self.phase {
            Phase::Exercising => self.plan.exercise_at(self.cursor),
            _ => None,
        }
    }

    /// Next exercise to perform, skipping long pauses.
    pub fn upcoming_exercise(&self) -> Option<&Exercise> {
        let from = match self.phase {
            Phase::PreWorkout => 0,
            Phase::Exercising | Phase::Resting | Phase::LongPausing => self.cursor + 1,
            Phase::Idle | Phase::Complete => return None,
        };
        self.plan.next_exercise(from)
    }

    /// Returns true while the final exercise of the workout is running.
    pub fn is_last_exercise(&self) -> bool {
        self.phase == Phase::Exercising && self.upcoming_exercise().is_none()
    }

    /// One-based number of the running exercise ("Übung X von N").
    pub fn exercise_number(&self) -> Option<usize> {
        if self.phase != Phase::Exercising {
            return None;
        }
        Some(self.plan.exercise_number(self.cursor))
    }

    /// Summary of a completed session.
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != Phase::Complete {
            return None;
        }
        let started_at = self.started_at?;
        let ended_at = self.ended_at?;
        let seconds = (ended_at - started_at).num_seconds().max(0) as u64;

        Some(SessionSummary {
            completed_exercises: self.completed_exercises,
            total_exercises: self.total_exercises() as u32,
            actual_duration_seconds: seconds,
            difficulty_label: self.plan.difficulty_label.clone(),
            started_at,
            ended_at,
        })
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(TimingConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
