//! In-memory view that records every call, for tests.

use std::sync::{Arc, Mutex, PoisonError};

use super::{ControlPanel, CountdownDisplay, ModeIndicator, StatsDisplay, ThemeApplier};
use crate::types::{Controls, Mode};

/// A single call made on a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Clock { minutes: u32, seconds: u32 },
    Highlight(Mode),
    Controls(Controls),
    FocusMode(bool),
    Finished,
    Theme(String),
    Stats {
        streak: u32,
        today_minutes: u32,
        total_hours: f64,
    },
}

/// View that stores calls instead of drawing.
///
/// Clones share the same call log, so one instance can be handed to the
/// engine and another kept for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    calls: Arc<Mutex<Vec<ViewCall>>>,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: ViewCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Returns a copy of every recorded call.
    #[must_use]
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Last clock value rendered, as (minutes, seconds).
    #[must_use]
    pub fn last_clock(&self) -> Option<(u32, u32)> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::Clock { minutes, seconds } => Some((minutes, seconds)),
            _ => None,
        })
    }

    /// Last controls state pushed to the panel.
    #[must_use]
    pub fn last_controls(&self) -> Option<Controls> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::Controls(controls) => Some(controls),
            _ => None,
        })
    }

    /// Last stats rendered, as (streak, today_minutes, total_hours).
    #[must_use]
    pub fn last_stats(&self) -> Option<(u32, u32, f64)> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::Stats {
                streak,
                today_minutes,
                total_hours,
            } => Some((streak, today_minutes, total_hours)),
            _ => None,
        })
    }

    /// Number of recorded calls matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&ViewCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }
}

impl CountdownDisplay for RecordingView {
    fn render(&mut self, minutes: u32, seconds: u32) {
        self.push(ViewCall::Clock { minutes, seconds });
    }
}

impl ModeIndicator for RecordingView {
    fn highlight(&mut self, mode: Mode) {
        self.push(ViewCall::Highlight(mode));
    }
}

impl ControlPanel for RecordingView {
    fn set_controls(&mut self, controls: Controls) {
        self.push(ViewCall::Controls(controls));
    }

    fn set_focus_mode(&mut self, enabled: bool) {
        self.push(ViewCall::FocusMode(enabled));
    }

    fn signal_finished(&mut self) {
        self.push(ViewCall::Finished);
    }
}

impl ThemeApplier for RecordingView {
    fn apply(&mut self, theme_id: &str) {
        self.push(ViewCall::Theme(theme_id.to_string()));
    }
}

impl StatsDisplay for RecordingView {
    fn render(&mut self, streak: u32, today_minutes: u32, total_hours: f64) {
        self.push(ViewCall::Stats {
            streak,
            today_minutes,
            total_hours,
        });
    }
}
