//! Interval Workout Timer Library
//!
//! This library provides the core functionality for the workout timer CLI.
//! It includes:
//! - Workout generator producing randomized exercise sequences
//! - Interval timer and session state machine
//! - Async engine driving the session with fixed-rate ticks
//! - Countdown cues with lazy audio and a vibration fallback
//! - Exercise library and difficulty preset loading
//! - CLI command parsing, display utilities and the interactive session

pub mod cli;
pub mod config;
pub mod engine;
pub mod sound;
pub mod types;
pub mod workout;

// Re-export commonly used types for convenience
pub use types::{
    ClockDuration, ConfigTable, Cue, DifficultyConfig, Exercise, ExerciseGroup, ExerciseLibrary,
    LibraryEntry, Phase, SequenceItem, TimingConfig, WorkoutPlan,
};

// Re-export engine types
pub use engine::{
    EngineCommand, IntervalTimer, SessionController, SessionEvent, SessionSummary, WorkoutEngine,
};

// Re-export generator
pub use workout::{generate, generate_plan, generate_workout, WorkoutError};

// Re-export configuration loading
pub use config::{builtin_config_table, builtin_library, ConfigError};

// Re-export sound types
pub use sound::{AudioGate, BeepPlayer, CueDelivery, MockBeepPlayer, SoundError, Vibrator};
