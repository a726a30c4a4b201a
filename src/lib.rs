//! concise-diff: unified-diff parsing and concise, scope-aware file rendering.
//!
//! The [`diff`] module is the pure core. [`filter`], [`git`] and [`review`]
//! apply it to the files changed in a local repository, configured through
//! [`config`]. [`rules`] picks the repository's coding rules for a change.

pub mod config;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod filter;
pub mod git;
pub mod review;
pub mod rules;

#[cfg(test)]
mod test_support;
