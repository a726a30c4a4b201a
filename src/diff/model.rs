//! Value types produced by the patch parser.

use serde::Serialize;

/// Which side(s) of the diff a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Line present only in the after-file.
    Add,
    /// Line present only in the before-file.
    Remove,
    /// Line present in both files.
    Context,
}

impl LineKind {
    /// The single-character prefix used when rendering a line of this kind.
    pub fn marker(self) -> char {
        match self {
            LineKind::Add => '+',
            LineKind::Remove => '-',
            LineKind::Context => ' ',
        }
    }

    /// Returns true if a line of this kind exists in the after-file.
    pub fn in_after_file(self) -> bool {
        matches!(self, LineKind::Add | LineKind::Context)
    }

    /// Returns true if a line of this kind exists in the before-file.
    pub fn in_before_file(self) -> bool {
        matches!(self, LineKind::Remove | LineKind::Context)
    }
}

/// One physical line inside a hunk, with coordinates in both file versions.
///
/// For `Context` lines both coordinates are real. For `Add` lines only
/// `after_line` is real and `before_line` is the insertion point in the
/// before-file. For `Remove` lines only `before_line` is real and
/// `after_line` is where the line would sit in the after-file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: LineKind,
    /// Line text with the diff marker stripped.
    pub content: String,
    /// 1-based line number in the before-file.
    pub before_line: usize,
    /// 1-based line number in the after-file.
    pub after_line: usize,
}

/// One `@@ ... @@` block, lines kept in their original diff order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hunk {
    /// `oldStart` from the hunk header.
    pub before_start: usize,
    /// `newStart` from the hunk header.
    pub after_start: usize,
    /// Trailing section heading after the closing `@@`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    pub(super) fn new(before_start: usize, after_start: usize, section: Option<String>) -> Self {
        Self {
            before_start,
            after_start,
            section,
            lines: Vec::new(),
        }
    }

    fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

/// A single file's patch: target filename plus its hunks in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedPatch {
    /// Path from the `+++` header; empty when the header is absent.
    pub filename: String,
    pub chunks: Vec<Hunk>,
}

impl ParsedPatch {
    /// Total number of added lines across all hunks.
    pub fn additions(&self) -> usize {
        self.chunks.iter().map(|h| h.count(LineKind::Add)).sum()
    }

    /// Total number of removed lines across all hunks.
    pub fn deletions(&self) -> usize {
        self.chunks.iter().map(|h| h.count(LineKind::Remove)).sum()
    }

    /// Iterate every diff line of every hunk in diff order.
    pub fn diff_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.chunks.iter().flat_map(|h| h.lines.iter())
    }
}

/// Closed line interval, both ends inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
