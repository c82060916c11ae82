//! Interactive terminal session.
//!
//! Reads key lines from stdin, forwards them to the workout engine and renders
//! the engine's events. The audio gate lives here: the first key press counts
//! as the user gesture that unlocks sound.

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::commands::{StartArgs, WorkoutArgs};
use super::display::Display;
use crate::config;
use crate::engine::{EngineCommand, SessionEvent, WorkoutEngine};
use crate::sound::{self, AudioGate};
use crate::types::{ConfigTable, DifficultyConfig, ExerciseLibrary, Phase, WorkoutPlan};
use crate::workout::{self, WorkoutError};

// ============================================================================
// WorkoutContext
// ============================================================================

/// Everything needed to generate workouts for one invocation.
#[derive(Debug)]
pub struct WorkoutContext {
    difficulty: String,
    library: ExerciseLibrary,
    configs: ConfigTable,
    custom: Option<DifficultyConfig>,
    rng: StdRng,
}

impl WorkoutContext {
    /// Loads library and presets and seeds the random generator.
    pub fn load(args: &WorkoutArgs) -> Result<Self> {
        let library = config::library_from(args.sources.library.as_deref())?;
        let configs = config::config_table_from(args.sources.difficulties.as_deref())?;
        let custom = args.custom_config()?;

        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            difficulty: args.difficulty.clone(),
            library,
            configs,
            custom,
            rng,
        })
    }

    /// Generates a fresh workout.
    pub fn next_plan(&mut self) -> Result<WorkoutPlan, WorkoutError> {
        workout::generate_plan(
            &self.difficulty,
            &self.library,
            &self.configs,
            self.custom.as_ref(),
            &mut self.rng,
        )
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Action requested by one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Enter: start the workout, or pause/resume it
    StartOrToggle,
    /// `q`: end the workout early
    End,
    /// `r`: restart with a freshly generated workout
    Restart,
    /// `x`: leave the program
    Quit,
    Unknown,
}

/// Maps an input line to its action.
pub fn parse_key(line: &str) -> KeyAction {
    match line.trim().to_lowercase().as_str() {
        "" | " " | "p" => KeyAction::StartOrToggle,
        "q" => KeyAction::End,
        "r" => KeyAction::Restart,
        "x" | "exit" => KeyAction::Quit,
        _ => KeyAction::Unknown,
    }
}

// ============================================================================
// SessionView
// ============================================================================

/// What the terminal currently shows, as mirrored from engine events.
#[derive(Debug)]
pub struct SessionView {
    plan: WorkoutPlan,
    phase: Phase,
    remaining: Duration,
    warning: bool,
    /// Redraw the countdown line on every tick
    live_countdown: bool,
}

impl SessionView {
    pub fn new(plan: WorkoutPlan, live_countdown: bool) -> Self {
        Self {
            plan,
            phase: Phase::Idle,
            remaining: Duration::ZERO,
            warning: false,
            live_countdown,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn is_warning(&self) -> bool {
        self.warning
    }

    /// Loads the plan about to be started.
    pub fn load(&mut self, plan: WorkoutPlan) {
        self.plan = plan;
        self.phase = Phase::PreWorkout;
        self.warning = false;
    }

    /// Renders one engine event; returns true once the workout has completed.
    pub fn apply(&mut self, event: SessionEvent, gate: &AudioGate) -> bool {
        match event {
            SessionEvent::Started { total_exercises } => {
                debug!(total_exercises, "Session started");
            }
            SessionEvent::PhaseChanged { phase, cursor } => {
                self.phase = phase;
                if phase != Phase::Complete {
                    Display::show_phase(phase, cursor, &self.plan);
                }
            }
            SessionEvent::ExerciseCompleted { completed } => {
                debug!(completed, "Exercise completed");
            }
            SessionEvent::Tick { remaining } => {
                self.remaining = remaining;
                if self.live_countdown {
                    Display::show_tick(remaining, self.warning);
                }
            }
            SessionEvent::WarningChanged { active } => {
                self.warning = active;
            }
            SessionEvent::Cue(cue) => {
                let delivery = gate.play(&cue);
                debug!(?cue, ?delivery, "Cue delivered");
            }
            SessionEvent::Paused => Display::show_paused(self.remaining),
            SessionEvent::Resumed => Display::show_resumed(),
            SessionEvent::Completed(summary) => {
                self.phase = Phase::Complete;
                self.warning = false;
                Display::show_summary(&summary);
                return true;
            }
            SessionEvent::Reset => {
                self.phase = Phase::Idle;
                self.warning = false;
            }
        }
        false
    }
}

// ============================================================================
// Session Loop
// ============================================================================

/// Runs an interactive workout session until the user quits.
///
/// When stdin is closed while a workout is running, the workout runs to its
/// end before the session returns.
pub async fn run(args: &StartArgs) -> Result<()> {
    let timing = args.timing();
    config::validate_timing(&timing)?;

    let mut context = WorkoutContext::load(&args.workout)?;
    let plan = context.next_plan()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let mut engine = WorkoutEngine::new(timing, event_tx);
    let engine_task = tokio::spawn(async move { engine.run(cmd_rx).await });

    let mut gate = sound::default_gate(args.no_sound);
    let mut view = SessionView::new(plan, std::io::stdout().is_terminal());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut quitting = false;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    Display::show_ready(view.plan());

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed");
                    stdin_open = false;
                    if !view.phase().is_active() {
                        break;
                    }
                    continue;
                };

                gate.unlock();
                match parse_key(&line) {
                    KeyAction::StartOrToggle if view.phase().is_active() => {
                        send(&cmd_tx, EngineCommand::ToggleRunning)?;
                    }
                    KeyAction::StartOrToggle => {
                        let next = if view.phase() == Phase::Complete {
                            context.next_plan()?
                        } else {
                            view.plan().clone()
                        };
                        view.load(next);
                        send(&cmd_tx, EngineCommand::Start(view.plan().clone()))?;
                    }
                    KeyAction::End => send(&cmd_tx, EngineCommand::End)?,
                    KeyAction::Restart => {
                        send(&cmd_tx, EngineCommand::Reset)?;
                        view.load(context.next_plan()?);
                        send(&cmd_tx, EngineCommand::Start(view.plan().clone()))?;
                    }
                    KeyAction::Quit => break,
                    KeyAction::Unknown => debug!(%line, "Ignoring unknown key"),
                }
            }
            event = event_rx.recv() => {
                let Some(event) = event else {
                    debug!("Engine stopped");
                    break;
                };
                if view.apply(event, &gate) && (quitting || !stdin_open) {
                    break;
                }
            }
            _ = &mut ctrl_c, if !quitting => {
                if !view.phase().is_active() {
                    break;
                }
                quitting = true;
                send(&cmd_tx, EngineCommand::End)?;
            }
        }
    }

    drop(cmd_tx);
    engine_task.await.context("Engine task failed")??;
    Ok(())
}

fn send(commands: &mpsc::UnboundedSender<EngineCommand>, command: EngineCommand) -> Result<()> {
    commands
        .send(command)
        .context("Failed to send engine command")
}

// ============================================================================
// Tests
// ============================================================================
