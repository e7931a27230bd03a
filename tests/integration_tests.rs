//! Integration tests for the timer engine, stats and widget wiring.
//!
//! These run on tokio's paused clock, so a 25 minute session completes
//! instantly while the engine still sees real deadlines:
//! - Full focus sessions update the stats exactly once
//! - Breaks, pauses and resets never count
//! - Paused sessions resume where they stopped
//! - Late ticks do not drift the countdown

use tokio::sync::mpsc;
use tokio::time::{advance, sleep, Duration};

use focus_widget::cli::WidgetCommand;
use focus_widget::engine::{EngineViews, TimerEngine, TimerEvent};
use focus_widget::sound::MockAudioDevice;
use focus_widget::types::{Mode, TimerStatus, WidgetConfig};
use focus_widget::view::{RecordingView, ViewCall};
use focus_widget::widget::{FocusWidget, WidgetViews};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_widget() -> (FocusWidget<MockAudioDevice>, RecordingView) {
    let view = RecordingView::new();
    let widget = FocusWidget::new(
        WidgetConfig::default(),
        WidgetViews::from_view(view.clone()),
        MockAudioDevice::new(),
        "Fireplace",
    );
    (widget, view)
}

fn create_engine() -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let engine = TimerEngine::new(
        &WidgetConfig::default(),
        EngineViews::from_view(RecordingView::new()),
        tx,
    );
    (engine, rx)
}

fn select(widget: &mut FocusWidget<MockAudioDevice>, mode: Mode, minutes: f64) {
    widget
        .handle_command(WidgetCommand::Mode {
            mode,
            minutes: Some(minutes),
        })
        .unwrap();
}

fn count_completions(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> usize {
    let mut count = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, TimerEvent::SessionCompleted { .. }) {
            count += 1;
        }
    }
    count
}

// ============================================================================
// Session Accounting
// ============================================================================

#[tokio::test(start_paused = true)]
async fn full_pomodoro_increments_streak_and_minutes() {
    let (mut widget, view) = create_widget();
    select(&mut widget, Mode::Pomodoro, 25.0);

    widget.handle_command(WidgetCommand::Start).unwrap();
    sleep(Duration::from_secs(25 * 60)).await;
    widget.process_pending_events();

    assert_eq!(widget.timer_state().remaining_seconds, 0);
    assert_eq!(widget.timer_state().status, TimerStatus::Idle);

    let stats = widget.stats();
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.today_minutes, 25);
    assert_eq!(stats.total_minutes, 25);
    assert_eq!(stats.total_hours_display(), "0.4");
    assert_eq!(view.count(|c| *c == ViewCall::Finished), 1);
}

#[tokio::test(start_paused = true)]
async fn break_expiry_leaves_stats_unchanged() {
    let (mut widget, _view) = create_widget();
    select(&mut widget, Mode::Break, 5.0);

    widget.handle_command(WidgetCommand::Start).unwrap();
    sleep(Duration::from_secs(5 * 60 + 1)).await;
    widget.process_pending_events();

    assert_eq!(widget.timer_state().remaining_seconds, 0);
    let stats = widget.stats();
    assert_eq!(stats.streak, 0);
    assert_eq!(stats.today_minutes, 0);
    assert_eq!(stats.total_minutes, 0);
}

#[tokio::test(start_paused = true)]
async fn consecutive_sessions_accumulate() {
    let (mut widget, _view) = create_widget();

    select(&mut widget, Mode::Pomodoro, 25.0);
    widget.handle_command(WidgetCommand::Start).unwrap();
    sleep(Duration::from_secs(25 * 60 + 1)).await;

    select(&mut widget, Mode::Break, 5.0);
    widget.handle_command(WidgetCommand::Start).unwrap();
    sleep(Duration::from_secs(5 * 60 + 1)).await;

    select(&mut widget, Mode::DeepWork, 50.0);
    widget.handle_command(WidgetCommand::Start).unwrap();
    sleep(Duration::from_secs(50 * 60 + 1)).await;

    widget.process_pending_events();
    let stats = widget.stats();
    assert_eq!(stats.streak, 2);
    assert_eq!(stats.total_minutes, 75);
    assert_eq!(stats.total_hours_display(), "1.3");
}

#[tokio::test(start_paused = true)]
async fn double_start_fires_one_completion() {
    let (engine, mut rx) = create_engine();
    engine.set_mode(Mode::DeepWork, 2.0).unwrap();

    engine.start().unwrap();
    engine.start().unwrap();
    sleep(Duration::from_secs(2 * 60 + 1)).await;

    assert_eq!(count_completions(&mut rx), 1);
}

// ============================================================================
// Pause / Resume / Reset
// ============================================================================

#[tokio::test(start_paused = true)]
async fn pause_then_resume_continues_countdown() {
    let (engine, _rx) = create_engine();

    engine.start().unwrap();
    sleep(Duration::from_secs(300)).await;
    engine.pause();
    let paused_at = engine.state().remaining_seconds;
    assert_eq!(paused_at, 1200);

    sleep(Duration::from_secs(600)).await;
    assert_eq!(engine.state().remaining_seconds, paused_at);

    engine.start().unwrap();
    sleep(Duration::from_secs(200)).await;
    assert_eq!(engine.state().remaining_seconds, 1000);
}

#[tokio::test(start_paused = true)]
async fn paused_session_never_completes() {
    let (engine, mut rx) = create_engine();
    engine.set_mode(Mode::Pomodoro, 1.0).unwrap();

    engine.start().unwrap();
    sleep(Duration::from_secs(30)).await;
    engine.pause();
    sleep(Duration::from_secs(120)).await;

    assert_eq!(engine.state().status, TimerStatus::Paused);
    assert_eq!(count_completions(&mut rx), 0);
}

#[tokio::test(start_paused = true)]
async fn reset_restores_duration_from_any_state() {
    let (engine, _rx) = create_engine();

    // From running
    engine.start().unwrap();
    sleep(Duration::from_secs(90)).await;
    engine.reset();
    assert_eq!(engine.state().remaining_seconds, 1500);
    assert!(!engine.state().is_running());

    // From paused
    engine.start().unwrap();
    sleep(Duration::from_secs(90)).await;
    engine.pause();
    engine.reset();
    assert_eq!(engine.state().remaining_seconds, 1500);

    // From expired
    engine.set_mode(Mode::Break, 1.0).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_secs(61)).await;
    assert_eq!(engine.state().remaining_seconds, 0);
    engine.reset();
    assert_eq!(engine.state().remaining_seconds, 60);
}

// ============================================================================
// Drift Correction
// ============================================================================

#[tokio::test(start_paused = true)]
async fn clock_jump_is_absorbed_by_deadline() {
    let (engine, mut rx) = create_engine();
    engine.set_mode(Mode::Pomodoro, 25.0).unwrap();

    engine.start().unwrap();
    sleep(Duration::from_secs(1)).await;

    // Suspend for longer than the whole session.
    advance(Duration::from_secs(30 * 60)).await;
    sleep(Duration::from_millis(1)).await;

    assert_eq!(engine.state().remaining_seconds, 0);
    assert_eq!(count_completions(&mut rx), 1);
}
