//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for concise rendering and local review.
///
/// This struct represents the contents of `.concise-diff.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Rendering settings
    // =========================================================================
    /// Lines kept before each touched line.
    pub before_lines: usize,

    /// Lines kept after each touched line.
    pub after_lines: usize,

    /// Line printed in place of each omitted run.
    #[serde(default = "default_elision_marker")]
    pub elision_marker: String,

    // =========================================================================
    // File selection settings
    // =========================================================================
    /// Globs a file must match to be reviewed (empty matches everything).
    pub include: Vec<String>,

    /// Globs that exclude a file from review.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Maximum number of files rendered per run.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Patches larger than this many KiB are skipped.
    #[serde(default = "default_max_size_kb")]
    pub max_size_kb: usize,

    // =========================================================================
    // Git settings
    // =========================================================================
    /// Base revision; inferred from the remote's default branch when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Head revision.
    #[serde(default = "default_head")]
    pub head: String,

    // =========================================================================
    // Review context settings
    // =========================================================================
    /// Directory of `*.mdc` coding rules, read at the head revision.
    /// Empty disables rule loading.
    #[serde(default = "default_rules_dir")]
    pub rules_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            before_lines: 0,
            after_lines: 0,
            elision_marker: default_elision_marker(),
            include: Vec::new(),
            exclude: default_exclude(),
            max_files: default_max_files(),
            max_size_kb: default_max_size_kb(),
            base: None,
            head: default_head(),
            rules_dir: default_rules_dir(),
        }
    }
}
