//! Ambient sound device implementation using rodio.
//!
//! This module provides the `RodioAudioDevice` which loops the ambient
//! track through the rodio v0.20 audio library.

use std::fs::File;
use std::io::BufReader;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::AmbientSource;
use super::AudioDevice;

/// Attenuation applied to the synthesized tone on top of the volume.
const TONE_AMPLITUDE: f32 = 0.2;

/// Output stream and the sink playing the ambient track.
struct Output {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Kept alongside the stream for the sink's lifetime.
    _handle: OutputStreamHandle,
    sink: Sink,
}

/// An ambient sound device backed by rodio.
///
/// The output device is opened on the first `play()`, so constructing the
/// device never fails; a missing device surfaces as a playback error.
pub struct RodioAudioDevice {
    source: AmbientSource,
    volume: f32,
    output: Option<Output>,
}

impl RodioAudioDevice {
    /// Creates a device for `source` at `volume` (0.0-1.0).
    #[must_use]
    pub fn new(source: AmbientSource, volume: f32) -> Self {
        Self {
            source,
            volume: volume.clamp(0.0, 1.0),
            output: None,
        }
    }

    /// Returns the configured track.
    #[must_use]
    pub fn source(&self) -> &AmbientSource {
        &self.source
    }

    fn open_output(&self) -> Result<Output, SoundError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.set_volume(self.volume);

        match &self.source {
            AmbientSource::File { name, path } => match append_file(&sink, path) {
                Ok(()) => debug!("Looping ambient file: {}", name),
                Err(e) if e.should_fallback_to_tone() => {
                    warn!(
                        "Failed to load ambient file '{}': {}, falling back to tone",
                        name, e
                    );
                    append_tone(&sink, super::source::DEFAULT_TONE_HZ);
                }
                Err(e) => return Err(e),
            },
            AmbientSource::Tone { name, frequency } => {
                debug!("Playing ambient tone: {}", name);
                append_tone(&sink, *frequency);
            }
        }

        Ok(Output {
            _stream: stream,
            _handle: handle,
            sink,
        })
    }
}

fn append_file(sink: &Sink, path: &std::path::Path) -> Result<(), SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    let decoder = Decoder::new_looped(BufReader::new(file))
        .map_err(|e| SoundError::DecodeError(e.to_string()))?;
    sink.append(decoder);
    Ok(())
}

fn append_tone(sink: &Sink, frequency: f32) {
    sink.append(SineWave::new(frequency).amplify(TONE_AMPLITUDE));
}

impl AudioDevice for RodioAudioDevice {
    fn play(&mut self) -> Result<(), SoundError> {
        match &self.output {
            Some(output) => output.sink.play(),
            None => {
                let output = self.open_output()?;
                output.sink.play();
                self.output = Some(output);
            }
        }
        debug!("Ambient sound started");
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SoundError> {
        if let Some(output) = &self.output {
            output.sink.pause();
            debug!("Ambient sound paused");
        }
        Ok(())
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

impl std::fmt::Debug for RodioAudioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudioDevice")
            .field("source", &self.source)
            .field("volume", &self.volume)
            .field("open", &self.output.is_some())
            .finish()
    }
}
