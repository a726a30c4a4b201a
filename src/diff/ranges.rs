//! Line-number sets and spans derived from hunks.

use std::collections::BTreeSet;

use super::model::{Hunk, LineKind, Region};

/// After-file line numbers of every added line in the hunk.
pub fn added_lines(hunk: &Hunk) -> BTreeSet<usize> {
    hunk.lines
        .iter()
        .filter(|l| l.kind == LineKind::Add)
        .map(|l| l.after_line)
        .collect()
}

/// Before-file line numbers of every removed line in the hunk.
pub fn removed_lines(hunk: &Hunk) -> BTreeSet<usize> {
    hunk.lines
        .iter()
        .filter(|l| l.kind == LineKind::Remove)
        .map(|l| l.before_line)
        .collect()
}

/// Span of the hunk in the after-file (added and context lines).
///
/// Returns `{0, 0}` when the hunk has no line in the after-file.
pub fn after_line_range(hunk: &Hunk) -> Region {
    span(
        hunk.lines
            .iter()
            .filter(|l| l.kind.in_after_file())
            .map(|l| l.after_line),
    )
}

/// Span of the hunk in the before-file (removed and context lines).
///
/// Returns `{0, 0}` when the hunk has no line in the before-file.
pub fn before_line_range(hunk: &Hunk) -> Region {
    span(
        hunk.lines
            .iter()
            .filter(|l| l.kind.in_before_file())
            .map(|l| l.before_line),
    )
}

fn span(values: impl Iterator<Item = usize>) -> Region {
    values
        .fold(None, |acc: Option<Region>, v| match acc {
            None => Some(Region::new(v, v)),
            Some(r) => Some(Region::new(r.start.min(v), r.end.max(v))),
        })
        .unwrap_or_default()
}

/// Collapse a set of integers into maximal closed intervals.
///
/// Input order and duplicates are irrelevant. Output is sorted by start and
/// no two returned intervals touch.
///
/// # Examples
///
/// ```
/// use concise_diff::diff::{contiguous_ranges, Region};
///
/// let ranges = contiguous_ranges([1, 2, 3, 5, 6, 8, 10, 11, 12]);
/// assert_eq!(
///     ranges,
///     vec![
///         Region::new(1, 3),
///         Region::new(5, 6),
///         Region::new(8, 8),
///         Region::new(10, 12),
///     ]
/// );
/// ```
pub fn contiguous_ranges<I>(indices: I) -> Vec<Region>
where
    I: IntoIterator<Item = usize>,
{
    let sorted: BTreeSet<usize> = indices.into_iter().collect();
    let mut ranges: Vec<Region> = Vec::new();

    for value in sorted {
        match ranges.last_mut() {
            Some(open) if open.end + 1 == value => open.end = value,
            _ => ranges.push(Region::new(value, value)),
        }
    }

    ranges
}
