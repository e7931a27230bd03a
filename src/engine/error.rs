//! Timer engine error types.

use thiserror::Error;

/// Errors returned by [`TimerEngine`](super::TimerEngine) commands.
///
/// Every variant leaves the timer state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimerError {
    /// Minutes were negative, NaN, infinite or too large for the counter.
    #[error("invalid duration: {0} minutes")]
    InvalidDuration(f64),

    /// `start()` was called outside a tokio runtime, so no tick can be armed.
    #[error("no async runtime available to drive the countdown")]
    NoRuntime,
}

impl TimerError {
    /// Returns true if the error was caused by user input.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidDuration(_))
    }
}
