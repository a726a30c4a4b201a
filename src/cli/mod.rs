//! CLI argument parsing for concise-diff.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// concise-diff: compact, scope-aware renderings of unified diffs.
///
/// Shows each changed region of a file together with the lines that open
/// its enclosing indentation scopes, and replaces everything else with a
/// single elision line per omitted run.
#[derive(Parser, Debug)]
#[command(name = "concise-diff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in this directory.
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Config file (default: `.concise-diff.yaml` in the repository root).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for concise-diff.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one file's concise view from its patch and full content.
    ///
    /// Either path may be `-` to read standard input.
    Render(RenderArgs),

    /// List the hunks of a single-file patch.
    ///
    /// Prints each hunk with its added and removed line numbers and the
    /// before/after line ranges it spans.
    Hunks(HunksArgs),

    /// Render every file changed on a branch of the current repository.
    ///
    /// Diffs `base...head`, applies the include/exclude globs and limits,
    /// and renders each non-removed file against its head content.
    Local(LocalArgs),
}

/// Margin flags shared by `render` and `local`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MarginArgs {
    /// Lines of plain context kept before each touched line.
    #[arg(short = 'B', long = "before", value_name = "N")]
    pub before: Option<usize>,

    /// Lines of plain context kept after each touched line.
    #[arg(short = 'A', long = "after", value_name = "N")]
    pub after: Option<usize>,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Patch text for the file.
    #[arg(long, value_name = "FILE")]
    pub patch: PathBuf,

    /// Full after-patch content of the file.
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub margins: MarginArgs,

    /// Line printed in place of each omitted run.
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,
}

/// Arguments for the `hunks` command.
#[derive(Parser, Debug)]
pub struct HunksArgs {
    /// Patch text to inspect (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub patch: PathBuf,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `local` command.
#[derive(Parser, Debug)]
pub struct LocalArgs {
    /// Base revision (default: the remote's mainline branch).
    #[arg(long, value_name = "REF")]
    pub base: Option<String>,

    /// Head revision.
    #[arg(long, value_name = "REF")]
    pub head: Option<String>,

    #[command(flatten)]
    pub margins: MarginArgs,

    /// Only review paths matching these globs.
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Skip paths matching these globs (replaces the configured list).
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Maximum number of files to render.
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Skip patches larger than this many KiB.
    #[arg(long = "max-size", value_name = "KB")]
    pub max_size_kb: Option<usize>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_render() {
        let cli = Cli::try_parse_from([
            "concise-diff",
            "render",
            "--patch",
            "a.patch",
            "--file",
            "-",
            "-B",
            "2",
            "--marker",
            "...",
        ])
        .unwrap();
        if let Command::Render(args) = cli.command {
            assert_eq!(args.patch, PathBuf::from("a.patch"));
            assert_eq!(args.file, PathBuf::from("-"));
            assert_eq!(args.margins.before, Some(2));
            assert_eq!(args.margins.after, None);
            assert_eq!(args.marker.as_deref(), Some("..."));
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_render_requires_file() {
        let result = Cli::try_parse_from(["concise-diff", "render", "--patch", "a.patch"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_hunks_json() {
        let cli = Cli::try_parse_from(["concise-diff", "hunks", "--patch", "-", "--json"]).unwrap();
        if let Command::Hunks(args) = cli.command {
            assert!(args.json);
        } else {
            panic!("Expected Hunks command");
        }
    }

    #[test]
    fn parse_local_minimal() {
        let cli = Cli::try_parse_from(["concise-diff", "local"]).unwrap();
        if let Command::Local(args) = cli.command {
            assert_eq!(args.base, None);
            assert!(args.include.is_empty());
            assert!(args.exclude.is_empty());
            assert!(!args.json);
        } else {
            panic!("Expected Local command");
        }
    }

    #[test]
    fn parse_local_full() {
        let cli = Cli::try_parse_from([
            "concise-diff",
            "-v",
            "local",
            "--base",
            "origin/main",
            "--head",
            "feature",
            "-A",
            "1",
            "--include",
            "*.rs,*.toml",
            "--max-files",
            "3",
            "--max-size",
            "50",
            "-C",
            "/tmp/repo",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.directory, Some(PathBuf::from("/tmp/repo")));
        if let Command::Local(args) = cli.command {
            assert_eq!(args.base.as_deref(), Some("origin/main"));
            assert_eq!(args.head.as_deref(), Some("feature"));
            assert_eq!(args.margins.after, Some(1));
            assert_eq!(args.include, vec!["*.rs", "*.toml"]);
            assert_eq!(args.max_files, Some(3));
            assert_eq!(args.max_size_kb, Some(50));
        } else {
            panic!("Expected Local command");
        }
    }
}
