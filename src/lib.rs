//! Focus Widget Library
//!
//! This library provides the core functionality for the focus timer widget.
//! It includes:
//! - Timer engine with deadline-corrected countdown and mode presets
//! - Session statistics (streak, minutes today, total hours)
//! - Ambient sound toggle backed by rodio
//! - Theme switching and presentation contracts
//! - CLI argument parsing and the interactive terminal session

pub mod cli;
pub mod engine;
pub mod sound;
pub mod types;
pub mod view;
pub mod widget;

// Re-export commonly used types for convenience
pub use types::{Controls, Mode, TimerState, TimerStatus, WidgetConfig};

// Re-export engine types
pub use engine::{EngineViews, StatsSnapshot, StatsTracker, TimerEngine, TimerError, TimerEvent};

// Re-export sound types
pub use sound::{AmbientSource, AudioDevice, MockAudioDevice, RodioAudioDevice, SoundError, SoundToggle};

// Re-export view types
pub use view::{
    format_clock, format_hours, ControlPanel, CountdownDisplay, ModeIndicator, RecordingView, StatsDisplay,
    TerminalView, ThemeApplier, ThemeSwitcher,
};

pub use widget::{Flow, FocusWidget, WidgetError, WidgetSummary, WidgetViews};
