//! Shell-level error type.
//!
//! Game logic never fails: invalid moves are rejected at the transition
//! boundary and surfaced as a sound cue. Only the terminal shell, the log
//! file and the command line configuration produce errors.

use derive_more::{Display, Error};

/// Error raised by the dashboard shell, with the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", message, file, line)]
pub struct AppError
{
    /// Error message.
    pub message: String,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl AppError
{
    /// Creates a new error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self
    {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for AppError
{
    #[track_caller]
    fn from(err: std::io::Error) -> Self
    {
        Self::new(format!("Terminal I/O failed: {}", err))
    }
}
