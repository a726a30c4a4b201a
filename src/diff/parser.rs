//! Core patch parsing logic.

use super::diagnostic::{self, Diagnostic};
use super::helpers::{parse_hunk_header, parse_new_file_line};
use super::model::{DiffLine, Hunk, LineKind, ParsedPatch};

/// Parse a single file's unified diff into hunks.
///
/// Never fails: malformed input yields fewer or empty hunks.
///
/// # Examples
///
/// ```
/// use concise_diff::diff::parse_patch;
///
/// let patch = "--- a/f.txt\n+++ b/f.txt\n@@ -1,2 +1,2 @@\n a\n-b\n+c\n";
/// let parsed = parse_patch(patch);
/// assert_eq!(parsed.filename, "f.txt");
/// assert_eq!(parsed.chunks.len(), 1);
/// assert_eq!(parsed.chunks[0].lines.len(), 3);
/// ```
pub fn parse_patch(patch: &str) -> ParsedPatch {
    parse_patch_with(patch, &mut diagnostic::ignore)
}

/// Same as [`parse_patch`], reporting recovered anomalies to `on_diagnostic`.
pub fn parse_patch_with(patch: &str, on_diagnostic: &mut dyn FnMut(Diagnostic)) -> ParsedPatch {
    let mut parser = PatchParser::default();

    for (idx, line) in patch.lines().enumerate() {
        parser.feed(idx + 1, line, on_diagnostic);
    }

    parser.finish()
}

/// Line-at-a-time state machine. `current` is the hunk being filled; the
/// counters are the before/after line numbers the next body line lands on.
/// `before_left`/`after_left` count the body lines the header still
/// promises on each side.
#[derive(Default)]
struct PatchParser {
    filename: Option<String>,
    chunks: Vec<Hunk>,
    current: Option<Hunk>,
    before_line: usize,
    after_line: usize,
    before_left: usize,
    after_left: usize,
}

impl PatchParser {
    fn feed(&mut self, line_no: usize, line: &str, on_diagnostic: &mut dyn FnMut(Diagnostic)) {
        // A new file section ends whatever hunk was open.
        if line.starts_with("diff --git ") {
            self.flush();
            return;
        }

        if line.starts_with("@@") {
            match parse_hunk_header(line) {
                Some(header) => {
                    self.flush();
                    self.before_line = header.before_seed();
                    self.after_line = header.after_seed();
                    self.before_left = header.before_len;
                    self.after_left = header.after_len;
                    self.current = Some(Hunk::new(
                        header.before_start,
                        header.after_start,
                        header.section,
                    ));
                }
                None => on_diagnostic(Diagnostic::MalformedHunkHeader {
                    line: line_no,
                    text: line.to_string(),
                }),
            }
            return;
        }

        // `+++ `/`--- ` are file headers unless the open hunk still expects
        // a body line on that side (an added `++ x` or a removed `-- x`).
        let in_body = self.current.is_some();
        if line.starts_with("+++ ") && !(in_body && self.after_left > 0) {
            if self.filename.is_none() {
                self.filename = parse_new_file_line(line);
            }
            return;
        }

        if line.starts_with("--- ") && !(in_body && self.before_left > 0) {
            return;
        }

        if line.starts_with('\\') {
            return;
        }

        let Some(hunk) = self.current.as_mut() else {
            // Header lines (index, mode, rename) before the first hunk.
            return;
        };

        let (kind, content) = if let Some(rest) = line.strip_prefix('+') {
            (LineKind::Add, rest)
        } else if let Some(rest) = line.strip_prefix('-') {
            (LineKind::Remove, rest)
        } else if let Some(rest) = line.strip_prefix(' ') {
            (LineKind::Context, rest)
        } else if !line.is_empty() {
            (LineKind::Context, line)
        } else {
            return;
        };

        hunk.lines.push(DiffLine {
            kind,
            content: content.to_string(),
            before_line: self.before_line,
            after_line: self.after_line,
        });

        if kind.in_before_file() {
            self.before_line = self.before_line.saturating_add(1);
            self.before_left = self.before_left.saturating_sub(1);
        }
        if kind.in_after_file() {
            self.after_line = self.after_line.saturating_add(1);
            self.after_left = self.after_left.saturating_sub(1);
        }
    }

    fn flush(&mut self) {
        if let Some(hunk) = self.current.take() {
            self.chunks.push(hunk);
        }
    }

    fn finish(mut self) -> ParsedPatch {
        self.flush();
        ParsedPatch {
            filename: self.filename.unwrap_or_default(),
            chunks: self.chunks,
        }
    }
}
