//! Parse-expand-render pipeline for one file.

use super::diagnostic::{self, Diagnostic};
use super::expand::{ContextExpander, ContextMargins, IndentationScope, LineSignificance};
use super::model::ParsedPatch;
use super::render::{render, RenderOptions};

/// Inputs for [`make_concise_file`].
pub struct ConciseFileParams<'a> {
    pub parsed_patch: &'a ParsedPatch,
    /// Full after-file text, line-separator joined.
    pub file_content: &'a str,
    pub margins: ContextMargins,
    pub render: RenderOptions,
    pub significance: &'a dyn LineSignificance,
}

impl<'a> ConciseFileParams<'a> {
    /// Zero margins, default marker, indentation scoping.
    pub fn new(parsed_patch: &'a ParsedPatch, file_content: &'a str) -> Self {
        Self {
            parsed_patch,
            file_content,
            margins: ContextMargins::default(),
            render: RenderOptions::default(),
            significance: &IndentationScope,
        }
    }

    pub fn margins(mut self, before: usize, after: usize) -> Self {
        self.margins = ContextMargins::new(before, after);
        self
    }

    pub fn elision_marker(mut self, marker: impl Into<String>) -> Self {
        self.render.elision_marker = marker.into();
        self
    }

    pub fn significance(mut self, significance: &'a dyn LineSignificance) -> Self {
        self.significance = significance;
        self
    }
}

/// Render the changed regions of a file with their enclosing scopes.
///
/// # Examples
///
/// ```
/// use concise_diff::diff::{make_concise_file, parse_patch, ConciseFileParams};
///
/// let patch = parse_patch("+++ b/a.py\n@@ -2,1 +2,1 @@\n-    x = 1\n+    x = 2\n");
/// let file = "def f():\n    x = 2\n\ndef g():\n    pass";
/// let concise = make_concise_file(ConciseFileParams::new(&patch, file));
/// assert_eq!(
///     concise,
///     " def f():\n-    x = 1\n+    x = 2\n // ...\n def g():\n // ..."
/// );
/// ```
pub fn make_concise_file(params: ConciseFileParams<'_>) -> String {
    make_concise_file_with(params, &mut diagnostic::ignore)
}

/// Same as [`make_concise_file`], reporting recovered anomalies.
pub fn make_concise_file_with(
    params: ConciseFileParams<'_>,
    on_diagnostic: &mut dyn FnMut(Diagnostic),
) -> String {
    let lines: Vec<&str> = params.file_content.split('\n').collect();

    let kept = ContextExpander::new(params.margins)
        .with_significance(params.significance)
        .expand_with(&lines, params.parsed_patch, on_diagnostic);

    render(&lines, &kept, params.parsed_patch, &params.render)
}
