//! Beep player implementation using rodio.
//!
//! Cues are synthesized as short sine tones; no sound files are involved.

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::error::SoundError;
use crate::types::Cue;

/// Output volume of a cue tone.
const CUE_VOLUME: f32 = 0.25;

/// A beep player that synthesizes cue tones with rodio.
///
/// Playback is non-blocking; each tone is played on a detached sink.
pub struct RodioBeepPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioBeepPlayer {
    /// Opens the default audio output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays the tone for `cue` in the background.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::StreamError` if no sink can be attached.
    pub fn play(&self, cue: &Cue) -> Result<(), SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        let tone = SineWave::new(cue.frequency_hz())
            .take_duration(cue.length())
            .amplify(CUE_VOLUME);

        sink.append(tone);
        sink.detach();

        debug!(?cue, hz = cue.frequency_hz(), "Cue tone started");
        Ok(())
    }
}

impl std::fmt::Debug for RodioBeepPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioBeepPlayer").finish_non_exhaustive()
    }
}
