//! Crate-level error types.

use std::fmt;

use crate::timeline::OutOfRange;

/// Errors produced by the isle crate.
#[derive(Debug)]
pub enum IsleError {
    /// A timeline index outside `[0, N)` was requested.
    OutOfRange(OutOfRange),
    /// A timeline was constructed with no entries.
    EmptyTimeline,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Timeline file parsing failure.
    TimelineParse(String),
    /// Malformed tour script step.
    Script(String),
}

impl fmt::Display for IsleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(e) => write!(f, "navigation error: {e}"),
            Self::EmptyTimeline => {
                write!(f, "timeline must contain at least one entry")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::TimelineParse(msg) => {
                write!(f, "timeline parse error: {msg}")
            }
            Self::Script(msg) => write!(f, "tour script error: {msg}"),
        }
    }
}

impl std::error::Error for IsleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfRange(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OutOfRange> for IsleError {
    fn from(e: OutOfRange) -> Self {
        Self::OutOfRange(e)
    }
}

impl From<std::io::Error> for IsleError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
