//! Ambient sound for the focus widget.
//!
//! This module provides:
//!
//! - An [`AudioDevice`] contract with a start/stop call that reports failure
//! - A rodio-backed device that loops a sound file or a built-in tone
//! - The on/off [`SoundToggle`] that keeps failures away from the timer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundToggle    │ ← on/off, reverts on failure
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   AudioDevice    │────▶│ RodioAudioDevice │
//! │                  │     ├──────────────────┤
//! │                  │────▶│ MockAudioDevice  │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use focus_widget::sound::{AmbientSource, RodioAudioDevice, SoundToggle};
//!
//! let device = RodioAudioDevice::new(AmbientSource::builtin(), 0.6);
//! let mut toggle = SoundToggle::new(device, "Fireplace");
//! let playing = toggle.toggle();
//! println!("playing: {}", playing);
//! ```

mod error;
mod player;
mod source;
mod toggle;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub use error::SoundError;
pub use player::RodioAudioDevice;
pub use source::{AmbientSource, DEFAULT_TONE_HZ, DEFAULT_TRACK_NAME};
pub use toggle::{NowPlaying, SoundToggle, NOW_PLAYING_EMOJI};

/// Trait for ambient sound output.
///
/// Both calls must return promptly; the sound keeps playing in the
/// background.
pub trait AudioDevice {
    /// Starts or resumes the ambient track.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is unavailable or playback is refused.
    fn play(&mut self) -> Result<(), SoundError>;

    /// Pauses the ambient track.
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the call.
    fn pause(&mut self) -> Result<(), SoundError>;

    /// Playback volume (0.0-1.0).
    fn volume(&self) -> f32;
}

#[derive(Debug, Default)]
struct MockState {
    play_calls: AtomicUsize,
    pause_calls: AtomicUsize,
    should_fail: AtomicBool,
}

/// Mock audio device for testing.
///
/// Clones share their counters.
#[derive(Debug, Clone, Default)]
pub struct MockAudioDevice {
    state: Arc<MockState>,
}

impl MockAudioDevice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `play()` fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.state.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of successful `play()` calls.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.state.play_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn pause_count(&self) -> usize {
        self.state.pause_calls.load(Ordering::SeqCst)
    }
}

impl AudioDevice for MockAudioDevice {
    fn play(&mut self) -> Result<(), SoundError> {
        if self.state.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.state.play_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SoundError> {
        self.state.pause_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn volume(&self) -> f32 {
        crate::types::DEFAULT_VOLUME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counts_calls() {
        let mut device = MockAudioDevice::new();
        device.play().unwrap();
        device.pause().unwrap();
        device.play().unwrap();

        assert_eq!(device.play_count(), 2);
        assert_eq!(device.pause_count(), 1);
    }

    #[test]
    fn test_mock_failure() {
        let mut device = MockAudioDevice::new();
        device.set_should_fail(true);

        let err = device.play().unwrap_err();
        assert!(matches!(err, SoundError::PlaybackError(_)));
        assert_eq!(device.play_count(), 0);
    }

    #[test]
    fn test_mock_clones_share_state() {
        let device = MockAudioDevice::new();
        let mut handle = device.clone();
        handle.play().unwrap();
        assert_eq!(device.play_count(), 1);
    }

    #[test]
    fn test_mock_volume_is_default() {
        assert_eq!(MockAudioDevice::new().volume(), 0.6);
    }
}
