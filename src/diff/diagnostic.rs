//! Recoverable anomalies reported by the parser and expander.
//!
//! The core never logs. Callers that care pass a hook; everyone else
//! passes [`ignore`].

use std::fmt;

/// Something odd in the input that was recovered from locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A line starting with `@@` whose line-number fields did not parse.
    /// The line was skipped.
    MalformedHunkHeader { line: usize, text: String },

    /// A hunk referenced an after-file line past the end of the supplied
    /// file. The line was left out of the kept set.
    OutOfBoundsLine { line: usize, line_count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedHunkHeader { line, text } => {
                write!(f, "skipping malformed hunk header on line {}: {}", line, text)
            }
            Diagnostic::OutOfBoundsLine { line, line_count } => write!(
                f,
                "patch references line {} but the file has {} lines",
                line, line_count
            ),
        }
    }
}

/// A hook that drops every diagnostic.
pub fn ignore(_: Diagnostic) {}
