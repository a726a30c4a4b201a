//! Configuration model for concise-diff.
//!
//! This module defines the Config struct that represents `.concise-diff.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::DEFAULT_CONFIG_FILE;
