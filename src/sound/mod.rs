//! Countdown cue delivery.
//!
//! This module provides audible and tactile cues for the last seconds of an
//! exercise:
//!
//! - Sine-tone beeps synthesized with rodio
//! - Terminal bell as the vibration fallback
//! - Audio acquisition deferred to the first user gesture
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    AudioGate     │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   BeepPlayer     │────▶│ RodioBeepPlayer  │
//! │ (after unlock)   │     └──────────────────┘
//! ├──────────────────┤     ┌──────────────────┐
//! │    Vibrator      │────▶│  TerminalBell    │
//! │   (fallback)     │     └──────────────────┘
//! └──────────────────┘
//! ```

mod error;
mod gate;
mod player;

use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use gate::{AudioGate, CueDelivery, PlayerFactory};
pub use player::RodioBeepPlayer;

use crate::types::Cue;

/// Trait for cue playback implementations.
pub trait BeepPlayer {
    /// Plays the tone for a cue without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, cue: &Cue) -> Result<(), SoundError>;
}

impl BeepPlayer for RodioBeepPlayer {
    fn play(&self, cue: &Cue) -> Result<(), SoundError> {
        RodioBeepPlayer::play(self, cue)
    }
}

/// Trait for the tactile fallback used when audio is not available.
pub trait Vibrator {
    /// Returns true if this device can vibrate at all.
    fn is_available(&self) -> bool;

    /// Signals a cue without sound.
    ///
    /// # Errors
    ///
    /// Returns an error if the signal could not be delivered.
    fn vibrate(&self, cue: &Cue) -> Result<(), SoundError>;
}

// ============================================================================
// TerminalBell
// ============================================================================

/// Rings the terminal bell (BEL) on stderr; the final cue rings twice.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Vibrator for TerminalBell {
    fn is_available(&self) -> bool {
        std::io::stderr().is_terminal()
    }

    fn vibrate(&self, cue: &Cue) -> Result<(), SoundError> {
        let bell = match cue {
            Cue::Countdown { .. } => "\x07",
            Cue::Final => "\x07\x07",
        };
        let mut stderr = std::io::stderr();
        stderr
            .write_all(bell.as_bytes())
            .and_then(|()| stderr.flush())
            .map_err(|e| SoundError::PlaybackError(e.to_string()))
    }
}

/// Builds the gate used by the interactive session.
///
/// With `disabled` set, no audio device is ever opened.
pub fn default_gate(disabled: bool) -> AudioGate {
    let gate = if disabled {
        AudioGate::disabled()
    } else {
        AudioGate::new(|| RodioBeepPlayer::new().map(|p| Box::new(p) as Box<dyn BeepPlayer>))
    };
    gate.with_vibrator(TerminalBell)
}

// ============================================================================
// Mocks
// ============================================================================

/// Mock beep player for testing.
#[derive(Debug, Default, Clone)]
pub struct MockBeepPlayer {
    played: Arc<Mutex<Vec<Cue>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockBeepPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.played.lock().unwrap().len()
    }

    #[must_use]
    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().unwrap().clone()
    }
}

impl BeepPlayer for MockBeepPlayer {
    fn play(&self, cue: &Cue) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.played.lock().unwrap().push(*cue);
        Ok(())
    }
}

/// Mock vibrator for testing.
#[derive(Debug, Clone)]
pub struct MockVibrator {
    vibrations: Arc<Mutex<Vec<Cue>>>,
    available: Arc<AtomicBool>,
}

impl MockVibrator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            vibrations: Arc::new(Mutex::new(Vec::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    #[must_use]
    pub fn vibrations(&self) -> Vec<Cue> {
        self.vibrations.lock().unwrap().clone()
    }
}

impl Default for MockVibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Vibrator for MockVibrator {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn vibrate(&self, cue: &Cue) -> Result<(), SoundError> {
        self.vibrations.lock().unwrap().push(*cue);
        Ok(())
    }
}
