//! Constants and default value functions used by the Config struct.

use crate::diff::DEFAULT_ELISION_MARKER;
use crate::rules::DEFAULT_RULES_DIR;

/// Config file name looked up in the repository root.
pub const DEFAULT_CONFIG_FILE: &str = ".concise-diff.yaml";

/// Default exclude globs for generated and vendored trees.
pub fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/dist/**".to_string(),
        "**/build/**".to_string(),
        "**/bin/**".to_string(),
        "**/artifacts/**".to_string(),
    ]
}

pub(super) fn default_elision_marker() -> String {
    DEFAULT_ELISION_MARKER.to_string()
}
pub(super) fn default_max_files() -> usize {
    10
}
pub(super) fn default_max_size_kb() -> usize {
    100
}
pub(super) fn default_head() -> String {
    "HEAD".to_string()
}
pub(super) fn default_rules_dir() -> String {
    DEFAULT_RULES_DIR.to_string()
}
