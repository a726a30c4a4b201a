//! Choosing which after-file lines to show around a change.
//!
//! Works purely on 0-based indices into the after-file's line array:
//! 1. lines the patch touches directly (added and context lines)
//! 2. a fixed margin before/after each touched line
//! 3. for each contiguous block, the nearest shallower-indented line at every
//!    depth above and below it, a cheap stand-in for "enclosing scope"

use std::collections::BTreeSet;

use super::diagnostic::{self, Diagnostic};
use super::model::ParsedPatch;
use super::ranges::contiguous_ranges;

/// Decides how deeply nested a line is.
///
/// `None` means the line carries no nesting information (blank lines) and
/// must be skipped while scanning for enclosing scopes.
pub trait LineSignificance {
    fn indent_level(&self, line: &str) -> Option<usize>;
}

/// Nesting depth from leading whitespace. Blank lines have no depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentationScope;

impl LineSignificance for IndentationScope {
    fn indent_level(&self, line: &str) -> Option<usize> {
        if line.trim().is_empty() {
            return None;
        }
        Some(line.chars().take_while(|c| c.is_whitespace()).count())
    }
}

/// Fixed number of lines shown before and after each touched line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextMargins {
    pub before: usize,
    pub after: usize,
}

impl ContextMargins {
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }
}

/// Indices of after-file lines the patch touches directly.
///
/// Removed lines have no after-file position and do not contribute.
/// Lines past the end of the file are dropped and reported.
pub fn touched_indices(
    patch: &ParsedPatch,
    line_count: usize,
    on_diagnostic: &mut dyn FnMut(Diagnostic),
) -> BTreeSet<usize> {
    let mut touched = BTreeSet::new();

    for line in patch.diff_lines().filter(|l| l.kind.in_after_file()) {
        let Some(idx) = line.after_line.checked_sub(1) else {
            continue;
        };
        if idx < line_count {
            touched.insert(idx);
        } else {
            on_diagnostic(Diagnostic::OutOfBoundsLine {
                line: line.after_line,
                line_count,
            });
        }
    }

    touched
}

/// Grow every index by the fixed margins, clamped to `[0, line_count - 1]`.
pub fn apply_margins(
    indices: &BTreeSet<usize>,
    margins: ContextMargins,
    line_count: usize,
) -> BTreeSet<usize> {
    let Some(last) = line_count.checked_sub(1) else {
        return BTreeSet::new();
    };

    let mut result = BTreeSet::new();
    for &idx in indices.iter().filter(|&&i| i <= last) {
        let lo = idx.saturating_sub(margins.before);
        let hi = idx.saturating_add(margins.after).min(last);
        result.extend(lo..=hi);
    }
    result
}

/// Add the enclosing-scope lines of every contiguous block in `indices`.
///
/// Each block is widened independently; the caller's kept set is the union.
pub fn expand_scope(
    lines: &[&str],
    indices: &BTreeSet<usize>,
    significance: &dyn LineSignificance,
) -> BTreeSet<usize> {
    let mut result = indices.clone();

    for region in contiguous_ranges(indices.iter().copied()) {
        if region.start >= lines.len() {
            continue;
        }
        let end = region.end.min(lines.len() - 1);

        let max_indent = lines[region.start..=end]
            .iter()
            .filter_map(|l| significance.indent_level(l))
            .max()
            .unwrap_or(0);

        scan_scope(
            (0..region.start).rev(),
            lines,
            max_indent,
            significance,
            &mut result,
        );
        scan_scope(
            end + 1..lines.len(),
            lines,
            max_indent,
            significance,
            &mut result,
        );
    }

    result
}

/// Walk `order`, keeping each line that is strictly shallower than every
/// line kept so far. Stops once nothing shallower than column 0 can exist.
fn scan_scope(
    order: impl Iterator<Item = usize>,
    lines: &[&str],
    max_indent: usize,
    significance: &dyn LineSignificance,
    result: &mut BTreeSet<usize>,
) {
    let mut threshold = max_indent;

    for idx in order {
        if threshold == 0 {
            break;
        }
        if let Some(indent) = significance.indent_level(lines[idx]) {
            if indent < threshold {
                result.insert(idx);
                threshold = indent;
            }
        }
    }
}

/// Runs all three expansion stages over one after-file.
pub struct ContextExpander<'a> {
    margins: ContextMargins,
    significance: &'a dyn LineSignificance,
}

impl Default for ContextExpander<'_> {
    fn default() -> Self {
        Self::new(ContextMargins::default())
    }
}

impl<'a> ContextExpander<'a> {
    /// Expander using [`IndentationScope`].
    pub fn new(margins: ContextMargins) -> Self {
        Self {
            margins,
            significance: &IndentationScope,
        }
    }

    /// Replace the nesting heuristic.
    pub fn with_significance(mut self, significance: &'a dyn LineSignificance) -> Self {
        self.significance = significance;
        self
    }

    /// Compute the kept index set for `patch` over `lines`.
    pub fn expand(&self, lines: &[&str], patch: &ParsedPatch) -> BTreeSet<usize> {
        self.expand_with(lines, patch, &mut diagnostic::ignore)
    }

    /// Same as [`ContextExpander::expand`], reporting dropped lines.
    pub fn expand_with(
        &self,
        lines: &[&str],
        patch: &ParsedPatch,
        on_diagnostic: &mut dyn FnMut(Diagnostic),
    ) -> BTreeSet<usize> {
        let touched = touched_indices(patch, lines.len(), on_diagnostic);
        let margined = apply_margins(&touched, self.margins, lines.len());
        expand_scope(lines, &margined, self.significance)
    }
}
