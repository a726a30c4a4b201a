//! Implementation of the `concise-diff local` command.

use super::{CommandContext, apply_margins};
use crate::cli::LocalArgs;
use concise_diff::config::Config;
use concise_diff::error::{ConciseError, Result};
use concise_diff::git;
use concise_diff::review::{format_local_review, review_local};

/// Execute the `concise-diff local` command.
///
/// Renders every file changed on the head revision since it forked from the
/// base, using the repository's config with command-line overrides. The
/// branch's commit messages and matching coding rules are printed first.
pub fn cmd_local(ctx: &CommandContext, args: LocalArgs) -> Result<()> {
    let repo_root = git::repo_root(&ctx.cwd)?;

    let mut config = ctx.load_config()?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let review = review_local(&repo_root, &config)?;
    if review.files.is_empty() {
        log::info!("no files to review between {} and {}", review.base, review.head);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&review).map_err(|e| {
            ConciseError::UserError(format!("failed to serialize review to JSON: {}", e))
        })?;
        println!("{}", json);
    } else {
        println!("{}", format_local_review(&review));
    }

    Ok(())
}

/// Command-line values win over the config file.
fn apply_overrides(config: &mut Config, args: &LocalArgs) {
    apply_margins(config, &args.margins);
    if let Some(base) = &args.base {
        config.base = Some(base.clone());
    }
    if let Some(head) = &args.head {
        config.head = head.clone();
    }
    if !args.include.is_empty() {
        config.include = args.include.clone();
    }
    if !args.exclude.is_empty() {
        config.exclude = args.exclude.clone();
    }
    if let Some(max_files) = args.max_files {
        config.max_files = max_files;
    }
    if let Some(max_size_kb) = args.max_size_kb {
        config.max_size_kb = max_size_kb;
    }
}
