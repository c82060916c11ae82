//! Sound system error types.
//!
//! None of these reach the user: cue delivery logs them and degrades to
//! vibration or silence.

use thiserror::Error;

/// Errors that can occur while producing countdown cues.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device could be opened.
    #[error("Audiogerät nicht verfügbar: {0}")]
    DeviceNotAvailable(String),

    /// A sink could not be attached to the output stream.
    #[error("Audiostream konnte nicht erstellt werden: {0}")]
    StreamError(String),

    /// Playing a cue failed.
    #[error("Wiedergabefehler: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "Bitte ein Audiogerät anschließen oder --no-sound verwenden",
            Self::StreamError(_) => "Bitte die Audioeinstellungen prüfen",
            Self::PlaybackError(_) => "Die Signale werden ohne Ton fortgesetzt",
        }
    }
}
