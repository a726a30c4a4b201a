//! Error types for the concise-diff CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! The `diff` module never returns these: parsing and rendering are total.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for the glue around the diff core.
#[derive(Error, Debug)]
pub enum ConciseError {
    /// Bad arguments, unreadable input, or invalid configuration.
    #[error("{0}")]
    UserError(String),

    /// A git subprocess failed.
    #[error("Git operation failed: {0}")]
    GitError(String),
}

impl ConciseError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConciseError::UserError(_) => exit_codes::USER_ERROR,
            ConciseError::GitError(_) => exit_codes::GIT_FAILURE,
        }
    }
}

/// Result type alias for concise-diff operations.
pub type Result<T> = std::result::Result<T, ConciseError>;
