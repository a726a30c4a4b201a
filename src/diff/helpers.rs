//! Helper functions for diff parsing.

use regex::Regex;
use std::sync::LazyLock;

/// `@@ -old[,len] +new[,len] @@[ section]`. Lengths are optional because git
/// omits them for single-line ranges.
static HUNK_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$")
        .expect("Invalid hunk header regex")
});

/// Fields of a hunk header. An omitted length means one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct HunkHeader {
    pub before_start: usize,
    pub before_len: usize,
    pub after_start: usize,
    pub after_len: usize,
    pub section: Option<String>,
}

impl HunkHeader {
    /// Before-file line number of the first body line.
    ///
    /// An empty range names the line *preceding* the change, so the body
    /// starts one past it.
    pub fn before_seed(&self) -> usize {
        range_seed(self.before_start, self.before_len)
    }

    /// After-file line number of the first body line.
    pub fn after_seed(&self) -> usize {
        range_seed(self.after_start, self.after_len)
    }
}

fn range_seed(start: usize, len: usize) -> usize {
    if len == 0 { start.saturating_add(1) } else { start }
}

/// Parse a hunk header line.
///
/// Returns None if the line does not match or a number field overflows.
pub(super) fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let caps = HUNK_HEADER_REGEX.captures(line)?;

    let number = |idx: usize| -> Option<usize> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(1),
        }
    };

    let before_start = number(1)?;
    let before_len = number(2)?;
    let after_start = number(3)?;
    let after_len = number(4)?;
    let section = caps
        .get(5)
        .map(|m| m.as_str().trim_end())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(HunkHeader {
        before_start,
        before_len,
        after_start,
        after_len,
        section,
    })
}

/// Extract the target filename from a `+++ ` header line.
///
/// Drops the `+++ ` prefix and the one-letter path marker (`b/`), and any
/// tab-separated timestamp. `/dev/null` (a deleted file) yields an empty name.
pub(super) fn parse_new_file_line(line: &str) -> Option<String> {
    let rest = line.strip_prefix("+++ ")?;
    let rest = rest.split('\t').next().unwrap_or(rest);

    if rest == "/dev/null" {
        return Some(String::new());
    }

    Some(normalize_path(rest.get(2..).unwrap_or("")))
}

/// Parse the file path from a "diff --git" line.
///
/// Handles various formats:
/// - "a/path/to/file b/path/to/file" (normal)
/// - "a/path/to/file b/path/to/renamed" (rename)
/// - "a/path b/path" (short paths)
///
/// Returns the "b/" path (new file path), or None if parsing fails.
pub(super) fn parse_diff_git_line(rest: &str) -> Option<String> {
    // Paths may contain spaces; the last " b/" separates the two paths.
    if let Some(b_pos) = rest.rfind(" b/") {
        let b_path = &rest[b_pos + 3..];
        return Some(normalize_path(b_path));
    }

    let parts: Vec<&str> = rest.split_whitespace().collect();
    if parts.len() >= 2 {
        let b_part = parts[parts.len() - 1];
        if let Some(path) = b_part.strip_prefix("b/") {
            return Some(normalize_path(path));
        }
    }

    None
}

/// Normalize a file path to use forward slashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
