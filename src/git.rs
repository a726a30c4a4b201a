//! Git command runner for concise-diff.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling. This is the local-repository collaborator
//! that feeds raw patches and file contents to the diff core.

use crate::error::{ConciseError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
    /// Standard output exactly as produced.
    pub raw_stdout: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        let raw_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        Self {
            stdout: raw_stdout.trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            raw_stdout,
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(ConciseError::GitError)` - On spawn failure or non-zero exit code
///
/// # Examples
///
/// ```no_run
/// use concise_diff::git::run_git;
/// use std::path::Path;
///
/// let output = run_git(Path::new("."), &["status", "--porcelain"])?;
/// println!("Changes: {}", output.stdout);
/// # Ok::<(), concise_diff::error::ConciseError>(())
/// ```
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    log::debug!("running git {} in {}", args.join(" "), cwd.display());

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            ConciseError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(ConciseError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path to the repository root
/// * `Err(ConciseError::UserError)` - If not inside a git repository (exit code 1)
pub fn repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    // "Not a repository" is a usage problem, not a git failure.
    let output = run_git(cwd, &["rev-parse", "--show-toplevel"]).map_err(|_| {
        ConciseError::UserError(
            "not inside a git repository. Run this command from within a git repository."
                .to_string(),
        )
    })?;
    Ok(PathBuf::from(&output.stdout))
}

/// Guess the branch a feature branch would merge into.
///
/// Tries `origin/HEAD`, then `origin/main` and `origin/master`, and falls
/// back to `HEAD~1`.
pub fn infer_mainline_branch<P: AsRef<Path>>(cwd: P) -> String {
    let cwd = cwd.as_ref();

    if let Ok(output) = run_git(cwd, &["symbolic-ref", "refs/remotes/origin/HEAD"]) {
        if let Some(branch) = output.stdout.strip_prefix("refs/remotes/origin/") {
            return branch.to_string();
        }
    }

    for branch in ["main", "master"] {
        let reference = format!("refs/remotes/origin/{}", branch);
        if run_git(cwd, &["show-ref", "--verify", "--quiet", &reference]).is_ok() {
            return branch.to_string();
        }
    }

    log::debug!("no mainline branch found on origin, falling back to HEAD~1");
    "HEAD~1".to_string()
}

/// Unified diff of every file changed on `head` since it forked from `base`.
pub fn diff_range<P: AsRef<Path>>(cwd: P, base: &str, head: &str) -> Result<String> {
    let range = format!("{}...{}", base, head);
    let output = run_git(cwd, &["diff", "--no-color", &range])?;
    Ok(output.raw_stdout)
}

/// Content of `path` at revision `rev`.
///
/// A missing file yields an empty string with a warning; callers render
/// against whatever text is available.
pub fn show_file<P: AsRef<Path>>(cwd: P, rev: &str, path: &str) -> String {
    let spec = format!("{}:{}", rev, path);
    match run_git(cwd, &["show", &spec]) {
        Ok(output) => output.raw_stdout,
        Err(e) => {
            log::warn!("could not read {} at {}: {}", path, rev, e);
            String::new()
        }
    }
}

/// One commit on the reviewed branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    pub sha: String,
    /// Full message, subject and body, trimmed.
    pub message: String,
}

/// Commits reachable from `head` but not from `base`, oldest first.
pub fn commit_messages<P: AsRef<Path>>(cwd: P, base: &str, head: &str) -> Result<Vec<CommitMessage>> {
    let range = format!("{}..{}", base, head);
    // Unit separator between sha and message, record separator after each commit.
    let output = run_git(cwd, &["log", "--reverse", "--format=%H%x1f%B%x1e", &range])?;

    Ok(output
        .raw_stdout
        .split('\x1e')
        .filter_map(|record| {
            let (sha, message) = record.trim_start().split_once('\x1f')?;
            Some(CommitMessage {
                sha: sha.to_string(),
                message: message.trim().to_string(),
            })
        })
        .collect())
}

/// Paths under `dir` tracked at revision `rev`.
pub fn list_files<P: AsRef<Path>>(cwd: P, rev: &str, dir: &str) -> Result<Vec<String>> {
    let output = run_git(cwd, &["ls-tree", "-r", "--name-only", rev, "--", dir])?;
    Ok(output.stdout.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_file, create_test_repo, git};
    use tempfile::TempDir;

    #[test]
    fn test_run_git_success() {
        let temp_dir = create_test_repo();
        let result = run_git(temp_dir.path(), &["status", "--porcelain"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_git_failure_returns_git_error() {
        let temp_dir = create_test_repo();
        let result = run_git(temp_dir.path(), &["checkout", "nonexistent-branch"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConciseError::GitError(_)));
    }

    #[test]
    fn test_repo_root_from_subdirectory() {
        let temp_dir = create_test_repo();
        let subdir = temp_dir.path().join("subdir").join("nested");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = repo_root(&subdir).unwrap();
        let expected = temp_dir.path().canonicalize().unwrap();
        assert_eq!(root.canonicalize().unwrap(), expected);
    }

    #[test]
    fn test_repo_root_outside_repo_returns_user_error() {
        let temp_dir = TempDir::new().unwrap(); // Not a git repo
        let err = repo_root(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConciseError::UserError(_)));
        assert!(err.to_string().contains("not inside a git repository"));
    }

    #[test]
    fn test_infer_mainline_without_remote_falls_back() {
        let temp_dir = create_test_repo();
        assert_eq!(infer_mainline_branch(temp_dir.path()), "HEAD~1");
    }

    #[test]
    fn test_diff_range_and_show_file() {
        let temp_dir = create_test_repo();
        let path = temp_dir.path();
        git(path, &["checkout", "-b", "feature"]);
        commit_file(path, "src/lib.rs", "    indented first line\nsecond\n");

        let diff = diff_range(path, "main", "feature").unwrap();
        assert!(diff.starts_with("diff --git a/src/lib.rs b/src/lib.rs\n"));
        assert!(diff.contains("+    indented first line\n"));

        let content = show_file(path, "feature", "src/lib.rs");
        assert_eq!(content, "    indented first line\nsecond\n");
    }

    #[test]
    fn test_commit_messages_oldest_first() {
        let temp_dir = create_test_repo();
        let path = temp_dir.path();
        git(path, &["checkout", "-b", "feature"]);
        commit_file(path, "a.txt", "a\n");
        std::fs::write(path.join("b.txt"), "b\n").unwrap();
        git(path, &["add", "b.txt"]);
        git(path, &["commit", "-m", "Add b\n\nWith a body line."]);

        let commits = commit_messages(path, "main", "feature").unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "Update a.txt");
        assert_eq!(commits[1].message, "Add b\n\nWith a body line.");
        assert_eq!(commits[1].sha.len(), 40);
    }

    #[test]
    fn test_commit_messages_empty_range() {
        let temp_dir = create_test_repo();
        let commits = commit_messages(temp_dir.path(), "main", "main").unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn test_list_files_under_directory() {
        let temp_dir = create_test_repo();
        let path = temp_dir.path();
        commit_file(path, "docs/a.md", "a\n");
        commit_file(path, "docs/deep/b.md", "b\n");

        let files = list_files(path, "HEAD", "docs").unwrap();
        assert_eq!(files, vec!["docs/a.md", "docs/deep/b.md"]);

        assert!(list_files(path, "HEAD", "missing").unwrap().is_empty());
    }

    #[test]
    fn test_show_missing_file_is_empty() {
        let temp_dir = create_test_repo();
        assert_eq!(show_file(temp_dir.path(), "HEAD", "nope.txt"), "");
    }
}
