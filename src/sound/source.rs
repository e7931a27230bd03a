//! Ambient track selection.

use std::path::{Path, PathBuf};

/// Name shown for the built-in ambient track.
pub const DEFAULT_TRACK_NAME: &str = "Fireplace";

/// Frequency of the built-in low hum, in Hz.
pub const DEFAULT_TONE_HZ: f32 = 110.0;

/// Where the ambient track comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum AmbientSource {
    /// A sound file on disk, looped.
    File {
        /// Display name (the file stem).
        name: String,
        /// Path to the file.
        path: PathBuf,
    },
    /// A synthesized tone, used when no file is configured.
    Tone {
        /// Display name.
        name: String,
        /// Frequency in Hz.
        frequency: f32,
    },
}

impl AmbientSource {
    /// Creates a file source named after the file stem.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = track_name(&path);
        Self::File { name, path }
    }

    /// The built-in tone.
    #[must_use]
    pub fn builtin() -> Self {
        Self::Tone {
            name: DEFAULT_TRACK_NAME.to_string(),
            frequency: DEFAULT_TONE_HZ,
        }
    }

    /// Picks the configured file, or the built-in tone when none is set.
    #[must_use]
    pub fn from_config(sound_file: Option<&Path>) -> Self {
        match sound_file {
            Some(path) => Self::file(path),
            None => Self::builtin(),
        }
    }

    /// Returns the display name of the track.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Tone { name, .. } => name,
        }
    }
}

impl Default for AmbientSource {
    fn default() -> Self {
        Self::builtin()
    }
}

fn track_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_TRACK_NAME.to_string())
}
