//! The ambient sound on/off switch.

use tracing::{info, warn};

use super::AudioDevice;

/// Emoji shown next to the ambient track name.
pub const NOW_PLAYING_EMOJI: &str = "🔥";

/// What the "now playing" badge shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub emoji: &'static str,
    pub label: String,
}

/// Switches the ambient track on and off.
///
/// A failed play leaves the toggle off; the timer is never involved.
#[derive(Debug)]
pub struct SoundToggle<A: AudioDevice> {
    device: A,
    track: String,
    playing: bool,
}

impl<A: AudioDevice> SoundToggle<A> {
    pub fn new(device: A, track: impl Into<String>) -> Self {
        Self {
            device,
            track: track.into(),
            playing: false,
        }
    }

    /// Flips the sound and returns whether it is now playing.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            if let Err(e) = self.device.pause() {
                warn!("Unable to pause audio: {}", e);
            }
            self.playing = false;
            info!("Ambient sound off");
        } else {
            match self.device.play() {
                Ok(()) => {
                    self.playing = true;
                    info!(
                        "Ambient sound on: {} (volume {:.1})",
                        self.track,
                        self.device.volume()
                    );
                }
                Err(e) => {
                    self.playing = false;
                    warn!("Unable to play audio: {} ({})", e, e.suggestion());
                }
            }
        }
        self.playing
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The badge shown for the ambient track.
    #[must_use]
    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying {
            emoji: NOW_PLAYING_EMOJI,
            label: self.track.clone(),
        }
    }
}
