//! Terminal rendering for the command-line front end.
//!
//! The countdown is redrawn in place on a single line; every other
//! message starts on a fresh line. Write errors (a closed pipe, say) are
//! dropped so the timer keeps running.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use super::{ControlPanel, CountdownDisplay, ModeIndicator, StatsDisplay, ThemeApplier};
use crate::types::{Controls, Mode};

#[derive(Debug, Default)]
struct TerminalInner {
    mode: Mode,
    last_clock: Option<(u32, u32)>,
    focus_mode: bool,
    /// The cursor sits at the end of a countdown line
    line_open: bool,
}

/// Prints the widget to stdout.
#[derive(Debug, Clone, Default)]
pub struct TerminalView {
    inner: Arc<Mutex<TerminalInner>>,
}

impl TerminalView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut TerminalInner) -> R) -> R {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut inner)
    }

    /// Ends the countdown line so the next write starts on a fresh one.
    fn close_line(&self) {
        self.with_inner(|inner| {
            if inner.line_open {
                let _ = writeln!(io::stdout().lock());
                inner.line_open = false;
            }
        });
    }

    /// Prints a full line, closing the countdown line first if needed.
    pub fn print_line(&self, message: &str) {
        self.close_line();
        let _ = writeln!(io::stdout().lock(), "{}", message);
    }

    /// Prints an error message to stderr.
    pub fn print_error(&self, message: &str) {
        self.close_line();
        let _ = writeln!(io::stderr().lock(), "error: {}", message);
    }

    /// Prints the list of interactive commands.
    pub fn print_help(&self) {
        self.print_line(
            "commands: start | pause | reset | mode <pomodoro|deep|break> [minutes] \
             | theme <id> | sound | stats | status | help | quit",
        );
    }
}

impl CountdownDisplay for TerminalView {
    fn render(&mut self, minutes: u32, seconds: u32) {
        self.with_inner(|inner| {
            if inner.last_clock == Some((minutes, seconds)) && inner.line_open {
                return;
            }
            inner.last_clock = Some((minutes, seconds));
            inner.line_open = true;

            let marker = if inner.focus_mode { "●" } else { "○" };
            let mut stdout = io::stdout().lock();
            let _ = write!(
                stdout,
                "\r{} {:<9} {:02}:{:02} ",
                marker,
                inner.mode.label(),
                minutes,
                seconds
            );
            let _ = stdout.flush();
        });
    }
}

impl ModeIndicator for TerminalView {
    fn highlight(&mut self, mode: Mode) {
        self.with_inner(|inner| {
            inner.mode = mode;
            inner.line_open = false;
        });
        let tabs: Vec<String> = Mode::ALL
            .iter()
            .map(|m| {
                if *m == mode {
                    format!("[{}]", m.label())
                } else {
                    format!(" {} ", m.label())
                }
            })
            .collect();
        let _ = writeln!(io::stdout().lock(), "\n{}", tabs.join(" "));
    }
}

impl ControlPanel for TerminalView {
    fn set_controls(&mut self, controls: Controls) {
        tracing::debug!(
            "controls: start={} pause={} reset={}",
            controls.start_enabled,
            controls.pause_enabled,
            controls.reset_enabled
        );
    }

    fn set_focus_mode(&mut self, enabled: bool) {
        self.with_inner(|inner| {
            inner.focus_mode = enabled;
            inner.line_open = false;
        });
    }

    fn signal_finished(&mut self) {
        // BEL
        self.print_line("\x07Time's up!");
    }
}

impl ThemeApplier for TerminalView {
    fn apply(&mut self, theme_id: &str) {
        self.print_line(&format!("Theme: {}", theme_id));
    }
}

impl StatsDisplay for TerminalView {
    fn render(&mut self, streak: u32, today_minutes: u32, total_hours: f64) {
        self.print_line(&format!(
            "Streak: {}  Today: {} min  Total: {} h",
            streak,
            today_minutes,
            super::format_hours(total_hours)
        ));
    }
}
