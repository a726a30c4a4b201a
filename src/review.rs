//! Concise renderings for every file changed in a local repository.
//!
//! Glue between git and the diff core: split the branch diff per file,
//! apply the file filter, fetch each file's head content, and render it.
//! The branch's commit messages and the coding rules that apply to the
//! rendered files travel along with the renderings.

use crate::config::Config;
use crate::diff::{
    make_concise_file_with, parse_patch, split_diff, ConciseFileParams, FilePatch, FileStatus,
};
use crate::error::Result;
use crate::git::{self, CommitMessage};
use crate::rules::{load_rules, matching_rules, CursorRule};
use serde::Serialize;
use std::path::Path;

/// Placeholder when the range has no commits.
pub const NO_COMMITS_MESSAGE: &str = "No commit messages found in this range.";

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReview {
    pub filename: String,
    pub status: FileStatus,
    pub additions: usize,
    pub deletions: usize,
    /// Concise rendering of the head version.
    pub concise: String,
}

/// Render the selected patches, reading after-file text through `fetch`.
///
/// Removed files have no after-file and are left out.
pub fn review_patches<F>(files: &[FilePatch], config: &Config, mut fetch: F) -> Result<Vec<FileReview>>
where
    F: FnMut(&str) -> String,
{
    let filter = config.file_filter()?;
    let selection = filter.select(files);
    let mut reviews = Vec::new();

    for file in selection.selected {
        if file.status == FileStatus::Removed {
            log::debug!("skipping removed file {}", file.path);
            continue;
        }

        log::debug!("processing {} ({})", file.path, file.status.as_str());
        let content = fetch(&file.path);
        let parsed = parse_patch(&file.patch);

        let params = ConciseFileParams {
            margins: config.margins(),
            render: config.render_options(),
            ..ConciseFileParams::new(&parsed, &content)
        };
        let concise = make_concise_file_with(params, &mut |d| {
            log::warn!("{}: {}", file.path, d);
        });

        reviews.push(FileReview {
            filename: file.path.clone(),
            status: file.status,
            additions: parsed.additions(),
            deletions: parsed.deletions(),
            concise,
        });
    }

    log::info!("processed {} of {} files", reviews.len(), files.len());
    Ok(reviews)
}

/// Everything gathered for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalReview {
    pub base: String,
    pub head: String,
    pub commits: Vec<CommitMessage>,
    /// Rules applying to at least one rendered file.
    pub rules: Vec<CursorRule>,
    pub files: Vec<FileReview>,
}

/// Review every file changed on the configured head since it forked from
/// the base. Without a configured base the mainline branch is inferred.
pub fn review_local<P: AsRef<Path>>(cwd: P, config: &Config) -> Result<LocalReview> {
    let cwd = cwd.as_ref();
    let base = match &config.base {
        Some(base) => base.clone(),
        None => git::infer_mainline_branch(cwd),
    };
    let diff_output = git::diff_range(cwd, &base, &config.head)?;
    let files = split_diff(&diff_output);
    log::debug!("{} files changed between {} and {}", files.len(), base, config.head);

    let reviews = review_patches(&files, config, |path| git::show_file(cwd, &config.head, path))?;
    let commits = git::commit_messages(cwd, &base, &config.head)?;

    let all_rules = load_rules(cwd, &config.head, &config.rules_dir);
    let filenames: Vec<&str> = reviews.iter().map(|r| r.filename.as_str()).collect();
    let rules = matching_rules(&filenames, &all_rules)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    log::debug!("{} of {} rules apply", rules.len(), all_rules.len());

    Ok(LocalReview {
        base,
        head: config.head.clone(),
        commits,
        rules,
        files: reviews,
    })
}

/// Format a branch review as prompt-ready text with `# Commit messages`,
/// `# Coding rules` (only when some apply) and `# Changes` sections.
pub fn format_local_review(review: &LocalReview) -> String {
    let commits = if review.commits.is_empty() {
        NO_COMMITS_MESSAGE.to_string()
    } else {
        review
            .commits
            .iter()
            .map(|c| c.message.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let mut sections = vec![format!("# Commit messages\n\n{}", commits)];
    if !review.rules.is_empty() {
        sections.push(format!("# Coding rules\n\n{}", format_rules(&review.rules)));
    }
    sections.push(format!("# Changes\n\n{}", format_reviews(&review.files)));

    sections.join("\n\n")
}

/// One `## Rule set:` block per rule with its globs and indented text.
pub fn format_rules(rules: &[CursorRule]) -> String {
    rules
        .iter()
        .map(|rule| {
            format!(
                "## Rule set: {}\n\nOnly applies to files matching these globs: {}\n\n{}",
                rule.description,
                rule.globs.join(", "),
                indent(&rule.content, 4)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format reviews as prompt-ready text: a `File:` heading per file and the
/// concise rendering indented by four spaces, separated by blank lines.
pub fn format_reviews(reviews: &[FileReview]) -> String {
    reviews
        .iter()
        .map(|r| format!("File: `{}`\n\n{}", r.filename, indent(&r.concise, 4)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}
