//! The focus widget: timer, stats, ambient sound and theme in one place.
//!
//! `FocusWidget` owns every component and is the only thing the front end
//! talks to. User intents arrive as [`WidgetCommand`]s; timer events are
//! drained from the engine channel and turned into stats updates.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::WidgetCommand;
use crate::engine::{EngineViews, StatsSnapshot, StatsTracker, TimerEngine, TimerError, TimerEvent};
use crate::sound::{AudioDevice, SoundToggle};
use crate::types::{Mode, TimerState, WidgetConfig};
use crate::view::{
    ControlPanel, CountdownDisplay, ModeIndicator, StatsDisplay, ThemeApplier, ThemeError,
    ThemeSwitcher,
};

/// Errors surfaced for a rejected command. The widget keeps running.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error(transparent)]
    Theme(#[from] ThemeError),
}

impl WidgetError {
    /// Returns true if the command itself was bad, as opposed to the
    /// widget being unable to carry it out.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::Timer(e) => e.is_input_error(),
            Self::Theme(_) => true,
        }
    }
}

/// Whether the front end should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Every presentation collaborator the widget needs.
pub struct WidgetViews {
    pub engine: EngineViews,
    pub theme: Box<dyn ThemeApplier>,
    pub stats: Box<dyn StatsDisplay>,
}

impl WidgetViews {
    /// Uses clones of one view for every role.
    pub fn from_view<V>(view: V) -> Self
    where
        V: CountdownDisplay
            + ModeIndicator
            + ControlPanel
            + ThemeApplier
            + StatsDisplay
            + Clone
            + 'static,
    {
        Self {
            engine: EngineViews::from_view(view.clone()),
            theme: Box::new(view.clone()),
            stats: Box::new(view),
        }
    }
}

/// Serializable end-of-session report.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetSummary {
    pub stats: StatsSnapshot,
    pub total_hours: String,
    pub timer: TimerState,
    pub theme: String,
    pub sound_playing: bool,
}

/// The assembled widget.
pub struct FocusWidget<A: AudioDevice> {
    config: WidgetConfig,
    engine: TimerEngine,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    stats: StatsTracker,
    stats_display: Box<dyn StatsDisplay>,
    sound: SoundToggle<A>,
    theme: ThemeSwitcher,
}

impl<A: AudioDevice> FocusWidget<A> {
    /// Builds the widget, applies the configured theme and draws the
    /// initial clock and stats.
    pub fn new(
        config: WidgetConfig,
        views: WidgetViews,
        audio: A,
        track: impl Into<String>,
    ) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        let theme = ThemeSwitcher::new(&config.theme, views.theme);
        let engine = TimerEngine::new(&config, views.engine, event_tx);
        let stats = StatsTracker::new();
        let mut stats_display = views.stats;
        stats.render_to(stats_display.as_mut());

        Self {
            config,
            engine,
            events,
            stats,
            stats_display,
            sound: SoundToggle::new(audio, track),
            theme,
        }
    }

    /// Applies one user command.
    ///
    /// # Errors
    ///
    /// Returns the reason a command was rejected; state is unchanged.
    pub fn handle_command(&mut self, command: WidgetCommand) -> Result<Flow, WidgetError> {
        debug!("Command: {:?}", command);
        match command {
            WidgetCommand::Start => self.engine.start()?,
            WidgetCommand::Pause => self.engine.pause(),
            WidgetCommand::Reset => self.engine.reset(),
            WidgetCommand::Mode { mode, minutes } => {
                let minutes = minutes.unwrap_or_else(|| self.preset_minutes(mode));
                self.engine.set_mode(mode, minutes)?;
            }
            WidgetCommand::Theme(theme_id) => self.theme.select(&theme_id)?,
            WidgetCommand::ToggleSound => {
                self.sound.toggle();
            }
            WidgetCommand::Stats => self.render_stats(),
            // Presentation-only commands are answered by the front end.
            WidgetCommand::Status | WidgetCommand::Help => {}
            WidgetCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Waits for the next timer event.
    pub async fn next_event(&mut self) -> Option<TimerEvent> {
        self.events.recv().await
    }

    /// Applies a timer event to the stats.
    pub fn handle_event(&mut self, event: TimerEvent) {
        if let TimerEvent::SessionCompleted { mode, minutes } = event {
            self.stats.record_completion(minutes);
            info!(
                "{} session counted: streak {}",
                mode.label(),
                self.stats.snapshot().streak
            );
            self.render_stats();
        }
    }

    /// Applies every event already queued. Returns how many were handled.
    pub fn process_pending_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    fn render_stats(&mut self) {
        self.stats.render_to(self.stats_display.as_mut());
    }

    fn preset_minutes(&self, mode: Mode) -> f64 {
        f64::from(self.config.minutes_for(mode))
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    #[must_use]
    pub fn timer_state(&self) -> TimerState {
        self.engine.state()
    }

    #[must_use]
    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    #[must_use]
    pub fn sound(&self) -> &SoundToggle<A> {
        &self.sound
    }

    #[must_use]
    pub fn theme(&self) -> &str {
        self.theme.current()
    }

    #[must_use]
    pub fn summary(&self) -> WidgetSummary {
        let stats = self.stats();
        WidgetSummary {
            stats,
            total_hours: stats.total_hours_display(),
            timer: self.timer_state(),
            theme: self.theme().to_string(),
            sound_playing: self.sound.is_playing(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
