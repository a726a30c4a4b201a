//! Cutting `git diff` output into per-file patches.

use serde::Serialize;

use super::helpers::parse_diff_git_line;

/// How a file changed between the two revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Removed => "removed",
            FileStatus::Renamed => "renamed",
        }
    }
}

/// One file's section of a multi-file diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePatch {
    /// Repository-relative path in the new revision (forward slashes).
    pub path: String,
    pub status: FileStatus,
    /// The section text, headers included, newline terminated.
    pub patch: String,
}

/// Split a multi-file unified diff at each `diff --git` line.
///
/// Text before the first `diff --git` line is ignored. Sections whose header
/// cannot be parsed are dropped.
pub fn split_diff(diff_output: &str) -> Vec<FilePatch> {
    let mut files = Vec::new();
    let mut current: Option<FilePatch> = None;
    let mut in_header = false;

    for line in diff_output.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            files.extend(current.take());
            current = parse_diff_git_line(rest).map(|path| FilePatch {
                path,
                status: FileStatus::Modified,
                patch: String::new(),
            });
            in_header = true;
        }

        let Some(file) = current.as_mut() else {
            continue;
        };

        if line.starts_with("@@") {
            in_header = false;
        }

        // Status lines only appear in the header, before the first hunk.
        if in_header {
            if line.starts_with("new file mode") {
                file.status = FileStatus::Added;
            } else if line.starts_with("deleted file mode") {
                file.status = FileStatus::Removed;
            } else if line.starts_with("rename from") {
                file.status = FileStatus::Renamed;
            }
        }

        file.patch.push_str(line);
        file.patch.push('\n');
    }

    files.extend(current);
    files
}
