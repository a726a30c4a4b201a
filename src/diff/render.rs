//! Emitting the concise text for a kept index set.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{DiffLine, ParsedPatch};
use super::ranges::contiguous_ranges;

/// Default line standing in for one or more omitted lines.
pub const DEFAULT_ELISION_MARKER: &str = " // ...";

/// Rendering knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub elision_marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            elision_marker: DEFAULT_ELISION_MARKER.to_string(),
        }
    }
}

/// Render the kept lines of `file_lines`, eliding everything else.
///
/// Lines the patch knows about are printed from the patch with their
/// `+`/`-`/` ` marker, in diff order. Other kept lines are printed from the
/// file with a single-space prefix. Each maximal run of skipped lines
/// becomes exactly one elision line. Kept indices past the end of the file
/// are ignored.
pub fn render(
    file_lines: &[&str],
    kept: &BTreeSet<usize>,
    patch: &ParsedPatch,
    options: &RenderOptions,
) -> String {
    let by_after_line = index_by_after_line(patch);
    let ranges = contiguous_ranges(kept.iter().copied().filter(|&i| i < file_lines.len()));

    let mut output: Vec<String> = Vec::new();
    // Index of the first line not yet printed or elided.
    let mut next = 0;

    for range in &ranges {
        if range.start > next {
            output.push(options.elision_marker.clone());
        }
        for idx in range.start..=range.end {
            emit_line(&mut output, idx, file_lines[idx], &by_after_line);
        }
        next = range.end + 1;
    }

    if next < file_lines.len() {
        output.push(options.elision_marker.clone());
    }

    output.join("\n")
}

/// After-file line number to every diff line keyed there, in diff order.
fn index_by_after_line(patch: &ParsedPatch) -> BTreeMap<usize, Vec<&DiffLine>> {
    let mut map: BTreeMap<usize, Vec<&DiffLine>> = BTreeMap::new();
    for line in patch.diff_lines() {
        map.entry(line.after_line).or_default().push(line);
    }
    map
}

fn emit_line(
    output: &mut Vec<String>,
    idx: usize,
    file_line: &str,
    by_after_line: &BTreeMap<usize, Vec<&DiffLine>>,
) {
    let Some(entries) = by_after_line.get(&(idx + 1)) else {
        output.push(format!(" {}", file_line));
        return;
    };

    for entry in entries {
        output.push(format!("{}{}", entry.kind.marker(), entry.content));
    }

    // Only removals sit here (zero-context patches); the file's own line at
    // this position is still part of the after-file.
    if !entries.iter().any(|e| e.kind.in_after_file()) {
        output.push(format!(" {}", file_line));
    }
}
