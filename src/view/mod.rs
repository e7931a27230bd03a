//! Presentation contracts for the widget.
//!
//! The timer core never draws anything itself. It talks to these
//! collaborator traits:
//!
//! ```text
//! ┌──────────────┐  render(m, s)      ┌──────────────────┐
//! │              │───────────────────▶│ CountdownDisplay │
//! │              │  highlight(mode)   ├──────────────────┤
//! │ TimerEngine  │───────────────────▶│  ModeIndicator   │
//! │              │  set_controls(..)  ├──────────────────┤
//! │              │───────────────────▶│   ControlPanel   │
//! └──────────────┘                    └──────────────────┘
//! ┌──────────────┐  apply(theme)      ┌──────────────────┐
//! │ThemeSwitcher │───────────────────▶│   ThemeApplier   │
//! └──────────────┘                    └──────────────────┘
//! ┌──────────────┐  render(..)        ┌──────────────────┐
//! │ FocusWidget  │───────────────────▶│   StatsDisplay   │
//! └──────────────┘                    └──────────────────┘
//! ```
//!
//! [`TerminalView`] implements every trait for the command-line front end;
//! [`RecordingView`] captures calls for tests.

mod recording;
mod terminal;
mod theme;

pub use recording::{RecordingView, ViewCall};
pub use terminal::TerminalView;
pub use theme::{ThemeError, ThemeSwitcher};

use crate::types::{Controls, Mode};

/// Shows the remaining time.
pub trait CountdownDisplay: Send {
    /// Renders the clock as minutes and seconds.
    fn render(&mut self, minutes: u32, seconds: u32);
}

/// Marks which mode control is active.
pub trait ModeIndicator: Send {
    /// Highlights `mode` and deselects the others.
    fn highlight(&mut self, mode: Mode);
}

/// Start / pause / reset buttons and the running-session cues.
pub trait ControlPanel: Send {
    /// Enables or disables the buttons.
    fn set_controls(&mut self, controls: Controls);

    /// Toggles the distraction-free look used while counting down.
    fn set_focus_mode(&mut self, enabled: bool);

    /// Briefly flags that a countdown just finished.
    fn signal_finished(&mut self);
}

/// Applies a named visual theme.
pub trait ThemeApplier {
    fn apply(&mut self, theme_id: &str);
}

/// Shows session statistics.
pub trait StatsDisplay {
    /// Renders the streak, today's minutes and lifetime hours.
    fn render(&mut self, streak: u32, today_minutes: u32, total_hours: f64);
}

/// Splits a number of seconds into whole minutes and leftover seconds.
pub fn split_clock(total_seconds: u32) -> (u32, u32) {
    (total_seconds / 60, total_seconds % 60)
}

/// Formats hours with one decimal place.
///
/// Rounds the exact binary value, so `0.15` (stored just below) shows as
/// "0.1". Odd quarter hours are the only exact ties and round up.
pub fn format_hours(hours: f64) -> String {
    let quarters = hours * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return format!("{:.1}", hours + 0.05);
    }
    format!("{:.1}", hours)
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    let (minutes, seconds) = split_clock(total_seconds);
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_clock() {
        assert_eq!(split_clock(0), (0, 0));
        assert_eq!(split_clock(45), (0, 45));
        assert_eq!(split_clock(90), (1, 30));
        assert_eq!(split_clock(25 * 60), (25, 0));
    }

    #[test]
    fn test_format_clock_pads() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(25 * 60), "25:00");
    }

    #[test]
    fn test_format_hours_rounds_half_up() {
        assert_eq!(format_hours(0.0), "0.0");
        assert_eq!(format_hours(15.0 / 60.0), "0.3");
        assert_eq!(format_hours(1.25), "1.3");
        assert_eq!(format_hours(25.0 / 60.0), "0.4");
        assert_eq!(format_hours(1.5), "1.5");
    }

    #[test]
    fn test_format_hours_rounds_once() {
        // Values that only look like ties once multiplied by ten
        assert_eq!(format_hours(9.0 / 60.0), "0.1");
        assert_eq!(format_hours(21.0 / 60.0), "0.3");
        assert_eq!(format_hours(33.0 / 60.0), "0.6");
    }

    #[test]
    fn test_format_clock_long_sessions() {
        assert_eq!(format_clock(120 * 60 + 59), "120:59");
    }
}
