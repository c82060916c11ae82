//! Command definitions for the workout CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{self, ConfigError};
use crate::types::{DifficultyConfig, TimingConfig, CUSTOM_DIFFICULTY};

/// Defaults for `-d custom` when a flag is omitted.
const DEFAULT_CUSTOM_EXERCISES: u32 = 8;
const DEFAULT_CUSTOM_PAUSES: u32 = 1;
const DEFAULT_CUSTOM_PAUSE_DURATION: &str = "01:00";

// ============================================================================
// CLI Structure
// ============================================================================

/// Interval workout timer with randomized exercise sequences
#[derive(Parser, Debug)]
#[command(
    name = "workout",
    version,
    about = "Intervall-Workout-Timer für das Terminal",
    long_about = "Erstellt zufällige Workouts aus einer Übungsbibliothek und führt\n\
                  mit Countdown, Erholungsphasen und langen Pausen durch das Training.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive workout session
    Start(StartArgs),

    /// Print a generated workout without running it
    Generate(GenerateArgs),

    /// List the difficulty presets
    Difficulties(SourceArgs),

    /// List the exercise library
    Exercises(SourceArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Shared Arguments
// ============================================================================

/// Where the exercise library and presets are read from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Exercise library JSON file (defaults to the built-in library)
    #[arg(long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Difficulty presets JSON file (defaults to the built-in presets)
    #[arg(long, value_name = "PATH")]
    pub difficulties: Option<PathBuf>,
}

/// Arguments that select and shape the generated workout
#[derive(Args, Debug, Clone)]
pub struct WorkoutArgs {
    /// Difficulty key (e.g. leicht, moderat, anstrengend, brutal, custom)
    #[arg(short, long, default_value = "leicht")]
    pub difficulty: String,

    /// Number of exercises for `-d custom` (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub exercises: Option<u32>,

    /// Number of long pauses for `-d custom` (0-20)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=20))]
    pub pauses: Option<u32>,

    /// Long pause duration for `-d custom`
    #[arg(long, value_name = "MM:SS")]
    pub pause_duration: Option<String>,

    /// Seed for a reproducible sequence
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub sources: SourceArgs,
}

impl Default for WorkoutArgs {
    fn default() -> Self {
        Self {
            difficulty: "leicht".to_string(),
            exercises: None,
            pauses: None,
            pause_duration: None,
            seed: None,
            sources: SourceArgs::default(),
        }
    }
}

impl WorkoutArgs {
    fn has_custom_flags(&self) -> bool {
        self.exercises.is_some() || self.pauses.is_some() || self.pause_duration.is_some()
    }

    /// Builds the custom configuration for `-d custom`.
    ///
    /// Returns `None` for preset difficulties.
    ///
    /// # Errors
    ///
    /// Returns an error if custom flags are combined with a preset, or if the
    /// custom values are invalid.
    pub fn custom_config(&self) -> Result<Option<DifficultyConfig>, ConfigError> {
        if self.difficulty != CUSTOM_DIFFICULTY {
            if self.has_custom_flags() {
                return Err(ConfigError::Invalid(format!(
                    "--exercises, --pauses und --pause-duration erfordern -d {}",
                    CUSTOM_DIFFICULTY
                )));
            }
            return Ok(None);
        }

        let config = config::custom_difficulty(
            self.exercises.unwrap_or(DEFAULT_CUSTOM_EXERCISES),
            self.pauses.unwrap_or(DEFAULT_CUSTOM_PAUSES),
            self.pause_duration
                .as_deref()
                .unwrap_or(DEFAULT_CUSTOM_PAUSE_DURATION),
        )?;
        Ok(Some(config))
    }
}

// ============================================================================
// Start Command Arguments
// ============================================================================

/// Arguments for the start command
#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,

    /// Exercise duration in seconds (5-600)
    #[arg(
        long,
        default_value = "50",
        value_parser = clap::value_parser!(u32).range(5..=600)
    )]
    pub exercise_secs: u32,

    /// Rest between exercises in seconds (1-300)
    #[arg(
        long,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..=300)
    )]
    pub rest_secs: u32,

    /// Disable countdown beeps
    #[arg(long)]
    pub no_sound: bool,
}

impl Default for StartArgs {
    fn default() -> Self {
        Self {
            workout: WorkoutArgs::default(),
            exercise_secs: 50,
            rest_secs: 10,
            no_sound: false,
        }
    }
}

impl StartArgs {
    /// Phase timing selected on the command line.
    pub fn timing(&self) -> TimingConfig {
        TimingConfig::default()
            .with_exercise_secs(self.exercise_secs)
            .with_rest_secs(self.rest_secs)
    }
}

// ============================================================================
// Generate Command Arguments
// ============================================================================

/// Arguments for the generate command
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,

    /// Print the workout as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Tests
// ============================================================================
