//! Session statistics.
//!
//! Counters only ever grow, and only when a focus session runs out on its
//! own. Pausing, resetting or switching modes never touches them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::view::{format_hours, StatsDisplay};

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Completed focus sessions since startup
    pub streak: u32,
    /// Focus minutes completed today
    pub today_minutes: u32,
    /// Focus minutes completed overall
    pub total_minutes: u32,
}

impl StatsSnapshot {
    /// Lifetime focus time in hours.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        f64::from(self.total_minutes) / 60.0
    }

    /// Lifetime hours rounded to one decimal place, as shown to the user.
    #[must_use]
    pub fn total_hours_display(&self) -> String {
        format_hours(self.total_hours())
    }
}

/// Accumulates completed sessions.
#[derive(Debug, Default)]
pub struct StatsTracker {
    stats: StatsSnapshot,
}

impl StatsTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one naturally completed focus session of `session_minutes`.
    pub fn record_completion(&mut self, session_minutes: u32) {
        self.stats.streak = self.stats.streak.saturating_add(1);
        self.stats.today_minutes = self.stats.today_minutes.saturating_add(session_minutes);
        self.stats.total_minutes = self.stats.total_minutes.saturating_add(session_minutes);
        debug!(
            "Session recorded: streak={} today={} total={}",
            self.stats.streak, self.stats.today_minutes, self.stats.total_minutes
        );
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats
    }

    /// Pushes the current counters to `display`.
    pub fn render_to(&self, display: &mut dyn StatsDisplay) {
        display.render(
            self.stats.streak,
            self.stats.today_minutes,
            self.stats.total_hours(),
        );
    }
}
