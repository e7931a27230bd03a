//! Command-line definitions for the focus widget.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::types::{ConfigError, WidgetConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Focus timer with presets, ambient sound, themes and session stats
#[derive(Parser, Debug)]
#[command(
    name = "focus-widget",
    version,
    about = "Focus timer with Pomodoro, deep work and break presets",
    long_about = "A terminal focus timer. Type commands such as `start`, `pause`, \
                  `mode deep` or `sound` while it runs.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub run: RunArgs,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Arguments
// ============================================================================

/// Options for an interactive session
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Config file (JSON); defaults to the platform config directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pomodoro preset in minutes (1-600)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=600))]
    pub pomodoro: Option<u32>,

    /// Deep work preset in minutes (1-600)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=600))]
    pub deep: Option<u32>,

    /// Break preset in minutes (1-600)
    #[arg(long = "break", value_parser = clap::value_parser!(u32).range(1..=600))]
    pub break_minutes: Option<u32>,

    /// Theme applied at startup
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Sound file looped as the ambient track
    #[arg(long)]
    pub sound_file: Option<PathBuf>,

    /// Countdown refresh period in milliseconds (10-1000)
    #[arg(long, value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_ms: Option<u64>,

    /// Print a JSON summary of the session on exit
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Loads the config file (explicit path, or the default one if it
    /// exists) and applies command-line overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// merged configuration is out of range.
    pub fn resolve_config(&self) -> Result<WidgetConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => WidgetConfig::load(path)?,
            None => match WidgetConfig::default_path().filter(|path| path.is_file()) {
                Some(path) => {
                    debug!("Loading config from {}", path.display());
                    WidgetConfig::load(&path)?
                }
                None => WidgetConfig::default(),
            },
        };

        let config = self.apply_overrides(base);
        config.validate()?;
        Ok(config)
    }

    /// Overlays the flags that were given on `config`.
    pub fn apply_overrides(&self, mut config: WidgetConfig) -> WidgetConfig {
        if let Some(minutes) = self.pomodoro {
            config.pomodoro_minutes = minutes;
        }
        if let Some(minutes) = self.deep {
            config.deep_work_minutes = minutes;
        }
        if let Some(minutes) = self.break_minutes {
            config.break_minutes = minutes;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(path) = &self.sound_file {
            config.sound_file = Some(path.clone());
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["focus-widget"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(!cli.run.json);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["focus-widget", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_presets() {
            let cli = Cli::parse_from([
                "focus-widget",
                "--pomodoro",
                "30",
                "--deep",
                "90",
                "--break",
                "10",
                "--theme",
                "forest",
            ]);
            assert_eq!(cli.run.pomodoro, Some(30));
            assert_eq!(cli.run.deep, Some(90));
            assert_eq!(cli.run.break_minutes, Some(10));
            assert_eq!(cli.run.theme.as_deref(), Some("forest"));
        }

        #[test]
        fn test_parse_rejects_out_of_range() {
            assert!(Cli::try_parse_from(["focus-widget", "--pomodoro", "0"]).is_err());
            assert!(Cli::try_parse_from(["focus-widget", "--tick-ms", "5"]).is_err());
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["focus-widget", "completions", "bash"]);
            assert!(matches!(cli.command, Some(Commands::Completions { .. })));
        }
    }

    mod config_tests {
        use super::*;
        use std::io::Write;

        #[test]
        fn test_overrides_apply() {
            let args = RunArgs {
                deep: Some(75),
                tick_ms: Some(100),
                ..RunArgs::default()
            };
            let config = args.apply_overrides(WidgetConfig::default());
            assert_eq!(config.deep_work_minutes, 75);
            assert_eq!(config.tick_interval_ms, 100);
            assert_eq!(config.pomodoro_minutes, 25);
        }

        #[test]
        fn test_resolve_explicit_file_then_flags() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, r#"{{"break_minutes": 7, "theme": "forest"}}"#).unwrap();

            let args = RunArgs {
                config: Some(file.path().to_path_buf()),
                theme: Some("dusk".to_string()),
                ..RunArgs::default()
            };
            let config = args.resolve_config().unwrap();
            assert_eq!(config.break_minutes, 7);
            assert_eq!(config.theme, "dusk");
        }

        #[test]
        fn test_resolve_missing_explicit_file_fails() {
            let args = RunArgs {
                config: Some(PathBuf::from("/nonexistent/focus-widget.json")),
                ..RunArgs::default()
            };
            assert!(args.resolve_config().is_err());
        }
    }
}
