//! Error types and result aliases for annofmt.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used for I/O, config and CLI work
//! - [`LineError`]: Recoverable failure while rewriting a single line
//! - [`Diagnostic`]: A [`LineError`] tied to the source line that produced it

use std::fmt;

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// Search direction of a quote lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Before => f.write_str("before"),
            Direction::After => f.write_str("after"),
        }
    }
}

/// Failure while rewriting one line. Never aborts the whole pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("no quote line found {direction} the control line")]
    MissingQuote { direction: Direction },

    #[error("heading marker run could not be read from the control line")]
    MalformedHeading,

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// A per-line error together with the line it was raised for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the original input text
    pub line_number: usize,
    /// Raw text of the offending line
    pub line: String,
    pub error: LineError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line_number, self.error, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_quote_message() {
        let err = LineError::MissingQuote {
            direction: Direction::After,
        };
        assert_eq!(err.to_string(), "no quote line found after the control line");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic {
            line_number: 7,
            line: "- ?".to_string(),
            error: LineError::MissingQuote {
                direction: Direction::Before,
            },
        };
        assert_eq!(
            diag.to_string(),
            "line 7: no quote line found before the control line (\"- ?\")"
        );
    }
}
