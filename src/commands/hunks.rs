//! Implementation of the `concise-diff hunks` command.
//!
//! Summarizes a single-file patch hunk by hunk: the header seeds, the
//! after/before spans, and the added/removed line numbers.

use super::{CommandContext, log_diagnostic};
use crate::cli::HunksArgs;
use concise_diff::diff::{
    added_lines, after_line_range, before_line_range, contiguous_ranges, parse_patch_with,
    removed_lines, Hunk, Region,
};
use concise_diff::error::{ConciseError, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// JSON shape of one hunk.
#[derive(Debug, Serialize)]
struct HunkSummary<'a> {
    before_start: usize,
    after_start: usize,
    section: Option<&'a str>,
    after_range: Region,
    before_range: Region,
    added: BTreeSet<usize>,
    removed: BTreeSet<usize>,
}

#[derive(Debug, Serialize)]
struct PatchSummary<'a> {
    filename: &'a str,
    additions: usize,
    deletions: usize,
    hunks: Vec<HunkSummary<'a>>,
}

impl<'a> HunkSummary<'a> {
    fn from_hunk(hunk: &'a Hunk) -> Self {
        Self {
            before_start: hunk.before_start,
            after_start: hunk.after_start,
            section: hunk.section.as_deref(),
            after_range: after_line_range(hunk),
            before_range: before_line_range(hunk),
            added: added_lines(hunk),
            removed: removed_lines(hunk),
        }
    }
}

/// Execute the `concise-diff hunks` command.
pub fn cmd_hunks(ctx: &CommandContext, args: HunksArgs) -> Result<()> {
    let patch_text = ctx.read_input(&args.patch)?;
    let label = args.patch.display().to_string();
    let parsed = parse_patch_with(&patch_text, &mut log_diagnostic(&label));

    let summary = PatchSummary {
        filename: &parsed.filename,
        additions: parsed.additions(),
        deletions: parsed.deletions(),
        hunks: parsed.chunks.iter().map(HunkSummary::from_hunk).collect(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| {
            ConciseError::UserError(format!("failed to serialize hunks to JSON: {}", e))
        })?;
        println!("{}", json);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}

fn format_summary(summary: &PatchSummary<'_>) -> String {
    let mut out = String::new();
    let name = if summary.filename.is_empty() {
        "(unnamed)"
    } else {
        summary.filename
    };
    out.push_str(&format!(
        "{}: {} hunk(s), +{} -{}\n",
        name,
        summary.hunks.len(),
        summary.additions,
        summary.deletions
    ));

    for hunk in &summary.hunks {
        out.push('\n');
        out.push_str(&format!("@@ -{} +{} @@", hunk.before_start, hunk.after_start));
        if let Some(section) = hunk.section {
            out.push(' ');
            out.push_str(section);
        }
        out.push('\n');
        out.push_str(&format!("  after:   {}\n", format_region(hunk.after_range)));
        out.push_str(&format!("  before:  {}\n", format_region(hunk.before_range)));
        out.push_str(&format!("  added:   {}\n", format_set(&hunk.added)));
        out.push_str(&format!("  removed: {}\n", format_set(&hunk.removed)));
    }

    out
}

fn format_region(region: Region) -> String {
    if region == Region::default() {
        "-".to_string()
    } else {
        format!("{}-{}", region.start, region.end)
    }
}

/// `3-5, 9` style listing of a line set.
fn format_set(lines: &BTreeSet<usize>) -> String {
    if lines.is_empty() {
        return "-".to_string();
    }
    contiguous_ranges(lines.iter().copied())
        .iter()
        .map(|r| {
            if r.start == r.end {
                r.start.to_string()
            } else {
                format!("{}-{}", r.start, r.end)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
