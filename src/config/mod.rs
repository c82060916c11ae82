//! Exercise library and difficulty preset loading.
//!
//! Built-in defaults are compiled into the binary from `assets/`; either file
//! can be replaced by a user-supplied JSON file.

mod error;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;

use crate::types::{ClockDuration, ConfigTable, DifficultyConfig, ExerciseLibrary, TimingConfig};

const BUILTIN_LIBRARY: &str = include_str!("../../assets/exercises.json");
const BUILTIN_DIFFICULTIES: &str = include_str!("../../assets/difficulties.json");

/// On-disk shape of an exercise library file.
#[derive(Debug, Serialize, Deserialize)]
struct LibraryFile {
    exercises: ExerciseLibrary,
}

// ============================================================================
// Exercise Library
// ============================================================================

/// Parses a library document; `name` identifies the source in errors.
pub fn parse_library(name: &str, json: &str) -> Result<ExerciseLibrary, ConfigError> {
    let file: LibraryFile = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
        name: name.to_string(),
        source,
    })?;
    debug!(source = name, entries = file.exercises.len(), "Exercise library loaded");
    Ok(file.exercises)
}

/// Returns the library shipped with the binary.
pub fn builtin_library() -> Result<ExerciseLibrary, ConfigError> {
    parse_library("exercises.json", BUILTIN_LIBRARY)
}

/// Reads a library from a JSON file.
pub fn load_library(path: &Path) -> Result<ExerciseLibrary, ConfigError> {
    let json = read(path)?;
    parse_library(&path.display().to_string(), &json)
}

/// Loads the library from `path`, or the built-in one.
pub fn library_from(path: Option<&Path>) -> Result<ExerciseLibrary, ConfigError> {
    match path {
        Some(path) => load_library(path),
        None => builtin_library(),
    }
}

// ============================================================================
// Difficulty Presets
// ============================================================================

/// Parses and validates a preset table.
pub fn parse_config_table(name: &str, json: &str) -> Result<ConfigTable, ConfigError> {
    let table: ConfigTable = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
        name: name.to_string(),
        source,
    })?;

    for (key, config) in &table {
        config
            .validate()
            .map_err(|msg| ConfigError::Invalid(format!("{}: {}", key, msg)))?;
    }

    debug!(source = name, presets = table.len(), "Difficulty presets loaded");
    Ok(table)
}

/// Returns the presets shipped with the binary.
pub fn builtin_config_table() -> Result<ConfigTable, ConfigError> {
    parse_config_table("difficulties.json", BUILTIN_DIFFICULTIES)
}

/// Reads a preset table from a JSON file.
pub fn load_config_table(path: &Path) -> Result<ConfigTable, ConfigError> {
    let json = read(path)?;
    parse_config_table(&path.display().to_string(), &json)
}

/// Loads presets from `path`, or the built-in ones.
pub fn config_table_from(path: Option<&Path>) -> Result<ConfigTable, ConfigError> {
    match path {
        Some(path) => load_config_table(path),
        None => builtin_config_table(),
    }
}

/// Builds a validated custom difficulty from command-line values.
pub fn custom_difficulty(
    total_exercises: u32,
    pause_count: u32,
    pause_duration: &str,
) -> Result<DifficultyConfig, ConfigError> {
    let duration: ClockDuration = pause_duration.parse()?;
    let config = DifficultyConfig::new(total_exercises, pause_count, duration);
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Validates phase timing.
pub fn validate_timing(timing: &TimingConfig) -> Result<(), ConfigError> {
    timing.validate().map_err(ConfigError::Invalid)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Tests
// ============================================================================
