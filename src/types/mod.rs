//! Core data types for the focus widget.
//!
//! This module defines the data structures used for:
//! - Timer modes and their presets
//! - Timer state and the control affordances derived from it
//! - Widget configuration with validation

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Mode
// ============================================================================

/// A named timer preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Classic 25 minute focus session
    #[serde(rename = "pomodoro")]
    Pomodoro,
    /// Long focus session
    #[serde(rename = "deep", alias = "deep-work")]
    DeepWork,
    /// Rest period; never counted in stats
    #[serde(rename = "break")]
    Break,
}

impl Mode {
    /// All modes, in the order the mode controls are laid out.
    pub const ALL: [Mode; 3] = [Mode::Pomodoro, Mode::DeepWork, Mode::Break];

    /// Returns the identifier used in commands and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Pomodoro => "pomodoro",
            Mode::DeepWork => "deep",
            Mode::Break => "break",
        }
    }

    /// Returns the human-readable label shown next to the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Pomodoro => "Pomodoro",
            Mode::DeepWork => "Deep work",
            Mode::Break => "Break",
        }
    }

    /// Returns true if completed sessions in this mode count towards stats.
    pub fn counts_towards_stats(&self) -> bool {
        !matches!(self, Mode::Break)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Pomodoro
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected pomodoro, deep or break)")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pomodoro" => Ok(Mode::Pomodoro),
            "deep" | "deep-work" | "deepwork" => Ok(Mode::DeepWork),
            "break" => Ok(Mode::Break),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

// ============================================================================
// TimerStatus
// ============================================================================

/// Where the timer sits in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Not counting; either fresh or naturally expired
    Idle,
    /// Counting down against a deadline
    Running,
    /// Stopped part way, resumable
    Paused,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }
}

impl Default for TimerStatus {
    fn default() -> Self {
        TimerStatus::Idle
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Snapshot of the countdown.
///
/// `remaining_seconds` never exceeds `duration_seconds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Active preset
    pub mode: Mode,
    /// Full length of the current session
    pub duration_seconds: u32,
    /// Seconds left on the clock
    pub remaining_seconds: u32,
    /// State machine position
    pub status: TimerStatus,
}

impl TimerState {
    /// Creates an idle state with a full clock.
    pub fn new(mode: Mode, duration_seconds: u32) -> Self {
        Self {
            mode,
            duration_seconds,
            remaining_seconds: duration_seconds,
            status: TimerStatus::Idle,
        }
    }

    /// Returns true while a tick source is armed.
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Rounded length of the session in minutes.
    pub fn session_minutes(&self) -> u32 {
        self.duration_seconds / 60 + u32::from(self.duration_seconds % 60 >= 30)
    }

    /// Returns the button affordances for this state.
    pub fn controls(&self) -> Controls {
        let reset_enabled = match self.status {
            TimerStatus::Running | TimerStatus::Paused => true,
            TimerStatus::Idle => self.remaining_seconds != self.duration_seconds,
        };
        Controls {
            start_enabled: !self.is_running() && self.remaining_seconds > 0,
            pause_enabled: self.is_running(),
            reset_enabled,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(Mode::Pomodoro, DEFAULT_POMODORO_MINUTES * 60)
    }
}

// ============================================================================
// Controls
// ============================================================================

/// Which of the start / pause / reset controls accept input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub reset_enabled: bool,
}

// ============================================================================
// WidgetConfig
// ============================================================================

/// Default pomodoro length in minutes.
pub const DEFAULT_POMODORO_MINUTES: u32 = 25;
/// Default deep work length in minutes.
pub const DEFAULT_DEEP_WORK_MINUTES: u32 = 50;
/// Default break length in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
/// Default tick period in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;
/// Default ambient sound volume.
pub const DEFAULT_VOLUME: f32 = 0.6;
/// Default theme identifier.
pub const DEFAULT_THEME: &str = "ember";

fn default_pomodoro_minutes() -> u32 {
    DEFAULT_POMODORO_MINUTES
}

fn default_deep_work_minutes() -> u32 {
    DEFAULT_DEEP_WORK_MINUTES
}

fn default_break_minutes() -> u32 {
    DEFAULT_BREAK_MINUTES
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_volume() -> f32 {
    DEFAULT_VOLUME
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Pomodoro preset in minutes (1-600)
    #[serde(default = "default_pomodoro_minutes")]
    pub pomodoro_minutes: u32,
    /// Deep work preset in minutes (1-600)
    #[serde(default = "default_deep_work_minutes")]
    pub deep_work_minutes: u32,
    /// Break preset in minutes (1-600)
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// Countdown refresh period in milliseconds (10-1000)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Ambient sound volume (0.0-1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Theme applied at startup
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Sound file looped as the ambient track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_file: Option<PathBuf>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            pomodoro_minutes: DEFAULT_POMODORO_MINUTES,
            deep_work_minutes: DEFAULT_DEEP_WORK_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            volume: DEFAULT_VOLUME,
            theme: default_theme(),
            sound_file: None,
        }
    }
}

impl WidgetConfig {
    /// Loads configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Default location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("focus-widget").join("config.json"))
    }

    /// Returns the preset length in minutes for `mode`.
    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Pomodoro => self.pomodoro_minutes,
            Mode::DeepWork => self.deep_work_minutes,
            Mode::Break => self.break_minutes,
        }
    }

    /// Creates a new configuration with the specified pomodoro length.
    pub fn with_pomodoro_minutes(mut self, minutes: u32) -> Self {
        self.pomodoro_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified deep work length.
    pub fn with_deep_work_minutes(mut self, minutes: u32) -> Self {
        self.deep_work_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified break length.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = minutes;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in Mode::ALL {
            let minutes = self.minutes_for(mode);
            if !(1..=600).contains(&minutes) {
                return Err(ConfigError::Invalid(format!(
                    "{} duration must be between 1 and 600 minutes, got {}",
                    mode, minutes
                )));
            }
        }
        if !(10..=1000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::Invalid(format!(
                "tick interval must be between 10 and 1000 ms, got {}",
                self.tick_interval_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::Invalid(format!(
                "volume must be between 0.0 and 1.0, got {}",
                self.volume
            )));
        }
        if self.theme.trim().is_empty() {
            return Err(ConfigError::Invalid("theme must not be empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
