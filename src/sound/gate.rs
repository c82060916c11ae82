//! Lazy, gesture-gated audio acquisition.
//!
//! The audio device is not touched until the first user gesture. Cues emitted
//! before that, or after acquisition failed, fall back to vibration when a
//! vibrator is available and are dropped otherwise.

use tracing::{debug, info, warn};

use super::{BeepPlayer, SoundError, Vibrator};
use crate::types::Cue;

/// Produces the audio player on unlock; called at most once.
pub type PlayerFactory = Box<dyn FnOnce() -> Result<Box<dyn BeepPlayer>, SoundError>>;

/// How a cue ended up being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueDelivery {
    Audio,
    Vibration,
    Silent,
}

enum AudioState {
    /// Waiting for the first user gesture
    Locked(PlayerFactory),
    /// Audio acquired
    Ready(Box<dyn BeepPlayer>),
    /// Acquisition failed; never retried
    Unavailable,
    /// Audio turned off by the user
    Disabled,
}

/// Owns the audio player and decides how each cue is delivered.
pub struct AudioGate {
    state: AudioState,
    vibrator: Option<Box<dyn Vibrator>>,
}

impl AudioGate {
    /// Creates a locked gate that will call `factory` on the first unlock.
    pub fn new<F>(factory: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn BeepPlayer>, SoundError> + 'static,
    {
        Self {
            state: AudioState::Locked(Box::new(factory)),
            vibrator: None,
        }
    }

    /// Creates a gate that never acquires audio.
    pub fn disabled() -> Self {
        Self {
            state: AudioState::Disabled,
            vibrator: None,
        }
    }

    /// Attaches a vibration fallback.
    pub fn with_vibrator(mut self, vibrator: impl Vibrator + 'static) -> Self {
        self.vibrator = Some(Box::new(vibrator));
        self
    }

    /// Acquires audio on the first user gesture.
    ///
    /// Later calls are no-ops. Returns true if audio is available afterwards.
    pub fn unlock(&mut self) -> bool {
        let state = std::mem::replace(&mut self.state, AudioState::Unavailable);
        self.state = match state {
            AudioState::Locked(factory) => match factory() {
                Ok(player) => {
                    info!("Audio unlocked");
                    AudioState::Ready(player)
                }
                Err(e) => {
                    warn!("Audio unavailable: {} ({})", e, e.suggestion());
                    AudioState::Unavailable
                }
            },
            other => other,
        };
        self.has_audio()
    }

    /// Returns true once the first gesture has been seen.
    pub fn is_unlocked(&self) -> bool {
        !matches!(self.state, AudioState::Locked(_))
    }

    pub fn has_audio(&self) -> bool {
        matches!(self.state, AudioState::Ready(_))
    }

    /// Delivers a cue by audio, vibration, or not at all.
    pub fn play(&self, cue: &Cue) -> CueDelivery {
        if let AudioState::Ready(player) = &self.state {
            match player.play(cue) {
                Ok(()) => return CueDelivery::Audio,
                Err(e) => warn!("Cue playback failed: {}", e),
            }
        }
        self.fallback(cue)
    }

    fn fallback(&self, cue: &Cue) -> CueDelivery {
        let Some(vibrator) = self.vibrator.as_ref().filter(|v| v.is_available()) else {
            debug!(?cue, "Cue dropped");
            return CueDelivery::Silent;
        };

        match vibrator.vibrate(cue) {
            Ok(()) => CueDelivery::Vibration,
            Err(e) => {
                debug!("Vibration failed: {}", e);
                CueDelivery::Silent
            }
        }
    }
}

impl std::fmt::Debug for AudioGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            AudioState::Locked(_) => "locked",
            AudioState::Ready(_) => "ready",
            AudioState::Unavailable => "unavailable",
            AudioState::Disabled => "disabled",
        };
        f.debug_struct("AudioGate")
            .field("state", &state)
            .field("vibrator", &self.vibrator.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
