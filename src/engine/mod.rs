//! Countdown engine and session accounting.
//!
//! - `timer`: the mode/start/pause/reset state machine and its tick task
//! - `stats`: streak and minute counters fed by completed sessions
//! - `error`: errors returned by engine commands

mod error;
mod stats;
mod timer;

pub use error::TimerError;
pub use stats::{StatsSnapshot, StatsTracker};
pub use timer::{EngineViews, TimerEngine, TimerEvent};
