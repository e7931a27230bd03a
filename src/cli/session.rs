//! Interactive terminal session.
//!
//! Reads one command per line and keeps the widget's event queue drained
//! until `quit`, end of input, or Ctrl-C.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, warn};

use super::input::WidgetCommand;
use crate::sound::AudioDevice;
use crate::view::{format_clock, TerminalView};
use crate::widget::{FocusWidget, Flow};

/// One-line description of the widget state.
pub fn status_line<A: AudioDevice>(widget: &FocusWidget<A>) -> String {
    let state = widget.timer_state();
    let stats = widget.stats();
    let sound = if widget.sound().is_playing() {
        let badge = widget.sound().now_playing();
        format!("{} {}", badge.emoji, badge.label)
    } else {
        "off".to_string()
    };
    format!(
        "{} {} ({}) | sound: {} | theme: {} | streak {} · today {} min · total {} h",
        state.mode.label(),
        format_clock(state.remaining_seconds),
        state.status.as_str(),
        sound,
        widget.theme(),
        stats.streak,
        stats.today_minutes,
        stats.total_hours_display()
    )
}

/// Applies one typed line. Returns `Flow::Quit` when the session should end.
pub fn handle_line<A: AudioDevice>(
    widget: &mut FocusWidget<A>,
    view: &TerminalView,
    line: &str,
) -> Flow {
    if line.trim().is_empty() {
        return Flow::Continue;
    }

    let command = match line.parse::<WidgetCommand>() {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected input '{}': {}", line.trim(), e);
            view.print_error(&e.to_string());
            return Flow::Continue;
        }
    };

    match command {
        WidgetCommand::Help => {
            view.print_help();
            Flow::Continue
        }
        WidgetCommand::Status => {
            view.print_line(&status_line(widget));
            Flow::Continue
        }
        other => match widget.handle_command(other) {
            Ok(flow) => flow,
            Err(e) if e.is_input_error() => {
                warn!("Rejected command '{}': {}", line.trim(), e);
                view.print_error(&format!("{} (type 'help' for usage)", e));
                Flow::Continue
            }
            Err(e) => {
                error!("Command '{}' failed: {}", line.trim(), e);
                view.print_error(&e.to_string());
                Flow::Continue
            }
        },
    }
}

/// Runs the session until the user quits or input ends.
///
/// # Errors
///
/// Returns an error if reading from `input` fails.
pub async fn run_session<A, R>(
    widget: &mut FocusWidget<A>,
    view: &TerminalView,
    input: R,
) -> Result<()>
where
    A: AudioDevice,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read command")? else {
                    debug!("Input closed");
                    break;
                };
                if handle_line(widget, view, &line) == Flow::Quit {
                    break;
                }
            }
            Some(event) = widget.next_event() => {
                widget.handle_event(event);
            }
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                break;
            }
        }
    }

    widget.process_pending_events();
    view.print_line("");
    Ok(())
}
