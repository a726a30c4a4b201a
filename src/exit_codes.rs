//! Exit code constants for the concise-diff CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid config)
//! - 2: Git operation failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input files, or invalid config.
pub const USER_ERROR: i32 = 1;

/// Git operation failure: diff or show could not run.
pub const GIT_FAILURE: i32 = 2;
