//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ParseClockError;

/// Errors that can occur while loading libraries and presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Datei '{}' konnte nicht gelesen werden: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("Datei '{name}' ist ungültig: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `MM:SS` value could not be parsed.
    #[error(transparent)]
    InvalidDuration(#[from] ParseClockError),

    /// A value is outside its allowed range.
    #[error("Ungültige Konfiguration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns true if the error came from reading or parsing a file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Io { .. } => "Bitte den Dateipfad prüfen",
            Self::Parse { .. } => "Bitte das JSON-Format der Datei prüfen",
            Self::InvalidDuration(_) => "Dauer im Format MM:SS angeben, z.B. 01:30",
            Self::Invalid(_) => "Bitte die angegebenen Werte prüfen",
        }
    }
}
