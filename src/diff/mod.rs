//! Unified-diff parsing and concise file rendering.
//!
//! Given one file's patch and the file's full after-patch text, this module
//! produces line-accurate hunks and a compacted rendering that shows the
//! changed regions, their enclosing indentation scopes, and one elision line
//! per omitted run.
//!
//! Everything here is a pure function of its inputs: no I/O, no logging.
//! Anomalies are reported through an optional [`Diagnostic`] hook.

mod concise;
mod diagnostic;
mod expand;
mod helpers;
mod model;
mod parser;
mod ranges;
mod render;
mod split;


pub use concise::{make_concise_file, make_concise_file_with, ConciseFileParams};
pub use diagnostic::Diagnostic;
pub use expand::{
    apply_margins, expand_scope, touched_indices, ContextExpander, ContextMargins,
    IndentationScope, LineSignificance,
};
pub use helpers::normalize_path;
pub use model::{DiffLine, Hunk, LineKind, ParsedPatch, Region};
pub use parser::{parse_patch, parse_patch_with};
pub use ranges::{added_lines, after_line_range, before_line_range, contiguous_ranges, removed_lines};
pub use render::{render, RenderOptions, DEFAULT_ELISION_MARKER};
pub use split::{split_diff, FilePatch, FileStatus};
