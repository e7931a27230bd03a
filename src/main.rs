//! Focus Widget CLI - a terminal focus timer
//!
//! Pick a preset, start the countdown, and let the widget count your
//! finished sessions:
//! - Pomodoro: 25 minutes of focus
//! - Deep work: a longer block, 50 minutes by default
//! - Break: 5 minutes, never counted

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use focus_widget::cli::{run_session, Cli, Commands};
use focus_widget::sound::{AmbientSource, RodioAudioDevice};
use focus_widget::view::TerminalView;
use focus_widget::widget::{FocusWidget, WidgetViews};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout belongs to the countdown display
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            let config = cli
                .run
                .resolve_config()
                .context("Failed to load configuration")?;

            let view = TerminalView::new();
            let source = AmbientSource::from_config(config.sound_file.as_deref());
            let track = source.name().to_string();
            let device = RodioAudioDevice::new(source, config.volume);

            let mut widget =
                FocusWidget::new(config, WidgetViews::from_view(view.clone()), device, track);
            view.print_help();

            run_session(&mut widget, &view, BufReader::new(tokio::io::stdin())).await?;

            if cli.run.json {
                let summary = serde_json::to_string_pretty(&widget.summary())
                    .context("Failed to serialize session summary")?;
                view.print_line(&summary);
            }
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
