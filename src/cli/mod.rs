//! CLI module for the focus widget.
//!
//! This module provides the command-line interface:
//! - `commands`: Argument definitions using clap derive
//! - `input`: Interactive commands typed during a session
//! - `session`: The stdin-driven session loop

pub mod commands;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use input::{CommandParseError, WidgetCommand};
pub use session::{handle_line, run_session, status_line};
