//! Parsing of interactive commands typed while the widget runs.

use std::str::FromStr;

use thiserror::Error;

use crate::types::{Mode, UnknownMode};

/// A user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    Start,
    Pause,
    Reset,
    /// Switch preset; `None` minutes means the configured preset length
    Mode {
        mode: Mode,
        minutes: Option<f64>,
    },
    Theme(String),
    ToggleSound,
    Stats,
    Status,
    Help,
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    UnknownMode(#[from] UnknownMode),

    #[error("'{0}' is not a number of minutes")]
    InvalidMinutes(String),
}

fn parse_minutes(arg: Option<&str>) -> Result<Option<f64>, CommandParseError> {
    arg.map(|raw| {
        raw.parse::<f64>()
            .map_err(|_| CommandParseError::InvalidMinutes(raw.to_string()))
    })
    .transpose()
}

impl FromStr for WidgetCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandParseError::Empty);
        };
        let head = head.to_ascii_lowercase();

        let command = match head.as_str() {
            "start" | "s" => WidgetCommand::Start,
            "pause" | "p" => WidgetCommand::Pause,
            "reset" | "r" => WidgetCommand::Reset,
            "mode" | "m" => {
                let mode = words
                    .next()
                    .ok_or(CommandParseError::MissingArgument("mode"))?
                    .parse::<Mode>()?;
                WidgetCommand::Mode {
                    mode,
                    minutes: parse_minutes(words.next())?,
                }
            }
            "pomodoro" | "deep" | "deep-work" | "break" => WidgetCommand::Mode {
                mode: head.parse::<Mode>()?,
                minutes: parse_minutes(words.next())?,
            },
            "theme" | "t" => WidgetCommand::Theme(
                words
                    .next()
                    .ok_or(CommandParseError::MissingArgument("theme"))?
                    .to_string(),
            ),
            "sound" | "music" => WidgetCommand::ToggleSound,
            "stats" => WidgetCommand::Stats,
            "status" => WidgetCommand::Status,
            "help" | "?" => WidgetCommand::Help,
            "quit" | "q" | "exit" => WidgetCommand::Quit,
            _ => return Err(CommandParseError::Unknown(head)),
        };
        Ok(command)
    }
}
