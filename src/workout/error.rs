//! Workout generation error types.
//!
//! Both errors are raised synchronously by the generator and are meant to be
//! handled before a session starts.

use thiserror::Error;

/// Errors that can occur while generating a workout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkoutError {
    /// The difficulty key is not configured, or `custom` was requested
    /// without a custom configuration.
    #[error("Unbekannte Schwierigkeit: {0}")]
    UnknownDifficulty(String),

    /// The exercise library is empty.
    #[error("Keine Übungen verfügbar")]
    NoExercises,
}

impl WorkoutError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnknownDifficulty(_) => {
                "Verfügbare Schwierigkeiten mit `workout difficulties` anzeigen"
            }
            Self::NoExercises => "Eine Übungsbibliothek mit mindestens einer Übung angeben",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorkoutError::UnknownDifficulty("unknown".to_string());
        assert_eq!(err.to_string(), "Unbekannte Schwierigkeit: unknown");

        let err = WorkoutError::NoExercises;
        assert_eq!(err.to_string(), "Keine Übungen verfügbar");
    }

    #[test]
    fn test_suggestion() {
        assert!(WorkoutError::UnknownDifficulty("x".into())
            .suggestion()
            .contains("difficulties"));
        assert!(WorkoutError::NoExercises.suggestion().contains("Übungsbibliothek"));
    }
}
