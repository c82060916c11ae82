//! Core data types for the workout timer.
//!
//! This module defines the data structures used for:
//! - Session phases
//! - The exercise library (individual exercises and paired groups)
//! - Difficulty configuration and phase timing with validation
//! - The generated workout sequence
//! - Countdown cues

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Phase
// ============================================================================

/// Represents the current phase of a workout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No workout is loaded
    #[default]
    Idle,
    /// Countdown before the first exercise
    PreWorkout,
    /// An exercise is in progress
    Exercising,
    /// Short rest between two exercises
    Resting,
    /// Configured long pause from the sequence
    LongPausing,
    /// Workout finished or ended manually
    Complete,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::PreWorkout => "pre_workout",
            Phase::Exercising => "exercising",
            Phase::Resting => "resting",
            Phase::LongPausing => "long_pausing",
            Phase::Complete => "complete",
        }
    }

    /// Returns true while a session is underway and the countdown matters.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Phase::PreWorkout | Phase::Exercising | Phase::Resting | Phase::LongPausing
        )
    }
}

// ============================================================================
// Exercise Library
// ============================================================================

/// A single movement from the exercise library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Exercise {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A paired movement (e.g. left and right side) scheduled back to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseGroup {
    pub left: Exercise,
    pub right: Exercise,
}

/// An entry of the exercise library.
///
/// Group entries are recognised by their `left`/`right` members; the
/// `"type": "group"` marker used in library files is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LibraryEntry {
    Group(ExerciseGroup),
    Single(Exercise),
}

impl LibraryEntry {
    /// Returns true if this entry is an individual exercise.
    pub fn is_single(&self) -> bool {
        matches!(self, LibraryEntry::Single(_))
    }

    /// Returns true if this entry is a paired group.
    pub fn is_group(&self) -> bool {
        matches!(self, LibraryEntry::Group(_))
    }
}

/// Read-only library of exercises keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseLibrary {
    entries: BTreeMap<String, LibraryEntry>,
}

impl ExerciseLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an individual exercise keyed by its id.
    pub fn with_exercise(mut self, exercise: Exercise) -> Self {
        self.entries
            .insert(exercise.id.clone(), LibraryEntry::Single(exercise));
        self
    }

    /// Adds a paired group under the given key.
    pub fn with_group(mut self, key: impl Into<String>, left: Exercise, right: Exercise) -> Self {
        self.entries.insert(
            key.into(),
            LibraryEntry::Group(ExerciseGroup { left, right }),
        );
        self
    }

    pub fn get(&self, id: &str) -> Option<&LibraryEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, entry)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LibraryEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

impl FromIterator<(String, LibraryEntry)> for ExerciseLibrary {
    fn from_iter<T: IntoIterator<Item = (String, LibraryEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// ClockDuration
// ============================================================================

/// Error returned when an `MM:SS` string cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("ungültige Dauer '{0}': erwartet MM:SS")]
pub struct ParseClockError(pub String);

/// A duration written as `MM:SS`, stored in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockDuration {
    seconds: u32,
}

impl ClockDuration {
    pub fn from_secs(seconds: u32) -> Self {
        Self { seconds }
    }

    pub fn as_secs(&self) -> u32 {
        self.seconds
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.seconds))
    }
}

impl FromStr for ClockDuration {
    type Err = ParseClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockError(s.to_string());

        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(err)?;
        let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(minutes) || !all_digits(seconds) || seconds.len() != 2 {
            return Err(err());
        }

        let minutes: u32 = minutes.parse().map_err(|_| err())?;
        let seconds: u32 = seconds.parse().map_err(|_| err())?;
        if seconds >= 60 {
            return Err(err());
        }

        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .map(Self::from_secs)
            .ok_or_else(err)
    }
}

impl TryFrom<String> for ClockDuration {
    type Error = ParseClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockDuration> for String {
    fn from(value: ClockDuration) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

// ============================================================================
// DifficultyConfig
// ============================================================================

/// Difficulty key that selects a user-supplied configuration.
pub const CUSTOM_DIFFICULTY: &str = "custom";

/// Display label used for custom configurations without a name.
pub const CUSTOM_DIFFICULTY_LABEL: &str = "Individuell";

/// Shape of a workout: how many exercises and how many long pauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    /// Display name of the preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of exercise items in the sequence
    pub total_exercises: u32,
    /// Maximum number of long pauses
    pub pause_count: u32,
    /// Length of each long pause
    pub pause_duration: ClockDuration,
}

impl DifficultyConfig {
    pub fn new(total_exercises: u32, pause_count: u32, pause_duration: ClockDuration) -> Self {
        Self {
            name: None,
            total_exercises,
            pause_count,
            pause_duration,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.total_exercises == 0 {
            return Err("Die Anzahl der Übungen muss mindestens 1 sein".to_string());
        }
        if self.pause_count > 0 && self.pause_duration.as_secs() == 0 {
            return Err("Die Pausendauer muss größer als 00:00 sein".to_string());
        }
        Ok(())
    }
}

/// Difficulty presets keyed by difficulty key.
pub type ConfigTable = BTreeMap<String, DifficultyConfig>;

// ============================================================================
// TimingConfig
// ============================================================================

/// Fixed phase durations of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingConfig {
    /// Countdown before the first exercise in seconds
    pub pre_workout_secs: u32,
    /// Exercise duration in seconds (5-600)
    pub exercise_secs: u32,
    /// Rest between exercises in seconds (1-300)
    pub rest_secs: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pre_workout_secs: 5,
            exercise_secs: 50,
            rest_secs: 10,
        }
    }
}

impl TimingConfig {
    pub fn with_exercise_secs(mut self, secs: u32) -> Self {
        self.exercise_secs = secs;
        self
    }

    pub fn with_rest_secs(mut self, secs: u32) -> Self {
        self.rest_secs = secs;
        self
    }

    pub fn pre_workout(&self) -> Duration {
        Duration::from_secs(u64::from(self.pre_workout_secs))
    }

    pub fn exercise(&self) -> Duration {
        Duration::from_secs(u64::from(self.exercise_secs))
    }

    pub fn rest(&self) -> Duration {
        Duration::from_secs(u64::from(self.rest_secs))
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.pre_workout_secs < 1 || self.pre_workout_secs > 60 {
            return Err("Der Countdown muss 1-60 Sekunden lang sein".to_string());
        }
        if self.exercise_secs < 5 || self.exercise_secs > 600 {
            return Err("Die Übungsdauer muss 5-600 Sekunden betragen".to_string());
        }
        if self.rest_secs < 1 || self.rest_secs > 300 {
            return Err("Die Erholungszeit muss 1-300 Sekunden betragen".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Sequence
// ============================================================================

/// One entry of a generated workout, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SequenceItem {
    /// Perform an exercise
    Exercise {
        #[serde(rename = "exerciseId")]
        exercise_id: String,
        exercise: Exercise,
    },
    /// Take a long pause
    Pause { duration: ClockDuration },
}

impl SequenceItem {
    pub fn exercise(exercise: Exercise) -> Self {
        SequenceItem::Exercise {
            exercise_id: exercise.id.clone(),
            exercise,
        }
    }

    pub fn pause(duration: ClockDuration) -> Self {
        SequenceItem::Pause { duration }
    }

    pub fn is_exercise(&self) -> bool {
        matches!(self, SequenceItem::Exercise { .. })
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, SequenceItem::Pause { .. })
    }

    /// Returns the resolved exercise for exercise items.
    pub fn as_exercise(&self) -> Option<&Exercise> {
        match self {
            SequenceItem::Exercise { exercise, .. } => Some(exercise),
            SequenceItem::Pause { .. } => None,
        }
    }
}

/// A generated sequence ready to be run by the session controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub difficulty_label: String,
    pub sequence: Vec<SequenceItem>,
}

impl WorkoutPlan {
    pub fn new(difficulty_label: impl Into<String>, sequence: Vec<SequenceItem>) -> Self {
        Self {
            difficulty_label: difficulty_label.into(),
            sequence,
        }
    }

    /// Number of exercise items in the sequence.
    pub fn total_exercises(&self) -> usize {
        self.sequence.iter().filter(|item| item.is_exercise()).count()
    }

    /// Exercise at `index`, if that item is an exercise.
    pub fn exercise_at(&self, index: usize) -> Option<&Exercise> {
        self.sequence.get(index)?.as_exercise()
    }

    /// First exercise at or after `index`, skipping pauses.
    pub fn next_exercise(&self, index: usize) -> Option<&Exercise> {
        self.sequence
            .iter()
            .skip(index)
            .find_map(SequenceItem::as_exercise)
    }

    /// One-based position of the exercise at `index` among all exercises.
    pub fn exercise_number(&self, index: usize) -> usize {
        self.sequence
            .iter()
            .take(index + 1)
            .filter(|item| item.is_exercise())
            .count()
    }
}

// ============================================================================
// Cue
// ============================================================================

/// Audible countdown signal during the last seconds of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// One of the seconds 5 down to 2
    Countdown { second: u8 },
    /// The last second, played with a higher tone
    Final,
}

impl Cue {
    /// Returns the cue for a whole-second boundary, if that second beeps.
    pub fn for_second(second: u64) -> Option<Self> {
        match second {
            1 => Some(Cue::Final),
            2..=5 => Some(Cue::Countdown {
                second: second as u8,
            }),
            _ => None,
        }
    }

    /// Tone frequency in hertz.
    pub fn frequency_hz(&self) -> f32 {
        match self {
            Cue::Countdown { .. } => 880.0,
            Cue::Final => 1320.0,
        }
    }

    /// Tone length, also used as the vibration length.
    pub fn length(&self) -> Duration {
        match self {
            Cue::Countdown { .. } => Duration::from_millis(150),
            Cue::Final => Duration::from_millis(400),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
