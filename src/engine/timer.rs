//! Timer engine for the focus widget.
//!
//! This module provides the countdown state machine:
//! - Mode selection (Idle ← set_mode from any state)
//! - Start / pause / reset transitions
//! - Deadline-based countdown driven by `tokio::time::interval`
//! - Event firing for display and stats integrations
//!
//! The remaining time is recomputed from an absolute deadline on every tick
//! rather than decremented, so late or skipped ticks never accumulate drift.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::error::TimerError;
use crate::types::{Mode, TimerState, TimerStatus, WidgetConfig};
use crate::view::{split_clock, ControlPanel, CountdownDisplay, ModeIndicator};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for stats and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// A new mode was selected and the clock refilled
    ModeChanged { mode: Mode, duration_seconds: u32 },
    /// Countdown started or resumed
    Started { mode: Mode, remaining_seconds: u32 },
    /// Remaining time recomputed
    Tick { remaining_seconds: u32 },
    /// Countdown paused
    Paused { remaining_seconds: u32 },
    /// Clock refilled to the full duration
    Reset { duration_seconds: u32 },
    /// Countdown reached zero on its own
    Expired { mode: Mode },
    /// A focus session finished and should be counted
    SessionCompleted { mode: Mode, minutes: u32 },
}

// ============================================================================
// EngineViews
// ============================================================================

/// The collaborators the engine draws through.
pub struct EngineViews {
    pub display: Box<dyn CountdownDisplay>,
    pub modes: Box<dyn ModeIndicator>,
    pub controls: Box<dyn ControlPanel>,
}

impl EngineViews {
    /// Uses clones of one view for every role.
    pub fn from_view<V>(view: V) -> Self
    where
        V: CountdownDisplay + ModeIndicator + ControlPanel + Clone + 'static,
    {
        Self {
            display: Box::new(view.clone()),
            modes: Box::new(view.clone()),
            controls: Box::new(view),
        }
    }
}

// ============================================================================
// Core
// ============================================================================

/// Everything behind the engine lock.
struct Core {
    state: TimerState,
    deadline: Option<Instant>,
    tick_source: Option<JoinHandle<()>>,
    /// Bumped whenever a tick source is cancelled; a tick carrying an older
    /// value is ignored.
    generation: u64,
    views: EngineViews,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl Core {
    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Timer event dropped: receiver closed");
        }
    }

    fn render(&mut self) {
        let (minutes, seconds) = split_clock(self.state.remaining_seconds);
        self.views.display.render(minutes, seconds);
    }

    fn refresh_controls(&mut self) {
        let controls = self.state.controls();
        self.views.controls.set_controls(controls);
    }

    /// Cancels the active tick source, if any.
    fn cancel_tick(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.deadline = None;
        if let Some(handle) = self.tick_source.take() {
            handle.abort();
            debug!("Tick source cancelled");
        }
    }

    fn set_mode(&mut self, mode: Mode, duration_seconds: u32) {
        let was_running = self.state.is_running();
        self.cancel_tick();

        self.state = TimerState::new(mode, duration_seconds);
        self.render();
        self.views.modes.highlight(mode);
        self.refresh_controls();
        if was_running {
            self.views.controls.set_focus_mode(false);
        }

        debug!("Mode set: {} ({}s)", mode, duration_seconds);
        self.emit(TimerEvent::ModeChanged {
            mode,
            duration_seconds,
        });
    }

    /// Recomputes the remaining time. Returns false once this tick source
    /// should stop.
    fn on_tick(&mut self, generation: u64, now: Instant) -> bool {
        if generation != self.generation || !self.state.is_running() {
            return false;
        }
        let Some(deadline) = self.deadline else {
            return false;
        };

        self.state.remaining_seconds =
            remaining_until(deadline, now).min(self.state.duration_seconds);
        self.render();
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        });

        if self.state.remaining_seconds == 0 {
            self.expire();
            return false;
        }
        true
    }

    /// Handles the countdown reaching zero on its own.
    fn expire(&mut self) {
        // Called from the tick task itself; it exits on its own.
        self.tick_source = None;
        self.cancel_tick();

        self.state.status = TimerStatus::Idle;
        self.refresh_controls();
        self.views.controls.set_focus_mode(false);
        self.views.controls.signal_finished();

        let mode = self.state.mode;
        self.emit(TimerEvent::Expired { mode });

        let minutes = self.state.session_minutes();
        if mode.counts_towards_stats() && minutes > 0 {
            info!("{} session completed ({} min)", mode.label(), minutes);
            self.emit(TimerEvent::SessionCompleted { mode, minutes });
        } else {
            debug!("{} countdown finished, not counted", mode.label());
        }
    }
}

impl Drop for Core {
    fn drop(&mut self) {
        if let Some(handle) = self.tick_source.take() {
            handle.abort();
        }
    }
}

fn lock(core: &Mutex<Core>) -> MutexGuard<'_, Core> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Whole seconds between `now` and `deadline`, rounded half up, never negative.
fn remaining_until(deadline: Instant, now: Instant) -> u32 {
    let millis = deadline.saturating_duration_since(now).as_millis();
    u32::try_from((millis + 500) / 1000).unwrap_or(u32::MAX)
}

/// Converts a minute count into whole seconds.
fn duration_from_minutes(minutes: f64) -> Result<u32, TimerError> {
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(TimerError::InvalidDuration(minutes));
    }
    let seconds = (minutes * 60.0).round();
    if seconds > f64::from(u32::MAX) {
        return Err(TimerError::InvalidDuration(minutes));
    }
    // In range and non-negative, checked above.
    Ok(seconds as u32)
}

async fn run_ticker(core: Weak<Mutex<Core>>, generation: u64, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let Some(shared) = core.upgrade() else {
            break;
        };
        let keep_ticking = lock(&shared).on_tick(generation, Instant::now());
        if !keep_ticking {
            break;
        }
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that manages the countdown state and events.
///
/// At most one tick task exists at a time. `pause`, `reset` and `set_mode`
/// abort it before returning.
pub struct TimerEngine {
    core: Arc<Mutex<Core>>,
    tick_interval: Duration,
}

impl TimerEngine {
    /// Creates an engine in pomodoro mode using the configured preset.
    pub fn new(
        config: &WidgetConfig,
        views: EngineViews,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let duration_seconds = config.pomodoro_minutes.saturating_mul(60);
        let mut core = Core {
            state: TimerState::new(Mode::Pomodoro, duration_seconds),
            deadline: None,
            tick_source: None,
            generation: 0,
            views,
            event_tx,
        };
        core.set_mode(Mode::Pomodoro, duration_seconds);

        Self {
            core: Arc::new(Mutex::new(core)),
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
        }
    }

    /// Selects `mode` with a clock of `minutes`, stopping any countdown.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvalidDuration`] without touching the state if
    /// `minutes` is negative, not finite, or too large.
    pub fn set_mode(&self, mode: Mode, minutes: f64) -> Result<(), TimerError> {
        let duration_seconds = duration_from_minutes(minutes).inspect_err(|_| {
            warn!("Rejected duration {} for {} mode", minutes, mode);
        })?;
        lock(&self.core).set_mode(mode, duration_seconds);
        Ok(())
    }

    /// Starts or resumes the countdown.
    ///
    /// Does nothing if the timer is already running or has no time left.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::NoRuntime`] if called outside a tokio runtime.
    pub fn start(&self) -> Result<(), TimerError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        let mut core = lock(&self.core);

        if core.state.is_running() {
            debug!("Start ignored: already running");
            return Ok(());
        }
        if core.state.remaining_seconds == 0 {
            debug!("Start ignored: no time left, reset first");
            return Ok(());
        }

        core.cancel_tick();
        let generation = core.generation;
        let remaining = core.state.remaining_seconds;
        core.deadline = Some(Instant::now() + Duration::from_secs(u64::from(remaining)));
        core.state.status = TimerStatus::Running;

        core.refresh_controls();
        core.views.controls.set_focus_mode(true);
        core.render();

        let mode = core.state.mode;
        debug!("Countdown started: {} with {}s left", mode, remaining);
        core.emit(TimerEvent::Started {
            mode,
            remaining_seconds: remaining,
        });

        core.tick_source = Some(runtime.spawn(run_ticker(
            Arc::downgrade(&self.core),
            generation,
            self.tick_interval,
        )));
        Ok(())
    }

    /// Pauses the countdown, keeping the remaining time.
    ///
    /// Does nothing if the timer is not running.
    pub fn pause(&self) {
        let mut core = lock(&self.core);
        if !core.state.is_running() {
            debug!("Pause ignored: not running");
            return;
        }

        core.cancel_tick();
        core.state.status = TimerStatus::Paused;
        core.refresh_controls();
        core.views.controls.set_focus_mode(false);
        core.render();

        let remaining_seconds = core.state.remaining_seconds;
        debug!("Countdown paused with {}s left", remaining_seconds);
        core.emit(TimerEvent::Paused { remaining_seconds });
    }

    /// Stops the countdown and refills the clock.
    pub fn reset(&self) {
        let mut core = lock(&self.core);
        let was_running = core.state.is_running();

        core.cancel_tick();
        core.state.status = TimerStatus::Idle;
        core.state.remaining_seconds = core.state.duration_seconds;
        core.render();
        core.refresh_controls();
        if was_running {
            core.views.controls.set_focus_mode(false);
        }

        let duration_seconds = core.state.duration_seconds;
        debug!("Countdown reset to {}s", duration_seconds);
        core.emit(TimerEvent::Reset { duration_seconds });
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> TimerState {
        lock(&self.core).state.clone()
    }

    /// Returns true while a tick task is armed.
    pub fn is_ticking(&self) -> bool {
        lock(&self.core).tick_source.is_some()
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state())
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
