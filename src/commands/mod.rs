//! Command implementations for concise-diff.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the invocation context every command shares: the
//! effective working directory and the config file to load.

mod hunks;
mod local;
mod render;

use crate::cli::{Cli, Command, MarginArgs};
use concise_diff::config::{Config, DEFAULT_CONFIG_FILE};
use concise_diff::error::{ConciseError, Result};
use concise_diff::git;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Path argument meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Resolved invocation context.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Absolute working directory (`-C` applied).
    pub cwd: PathBuf,

    /// Explicit `--config` path, if given.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Resolve the context from global CLI options.
    pub fn resolve(directory: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let current = std::env::current_dir().map_err(|e| {
            ConciseError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        let cwd = match directory {
            Some(dir) => current.join(dir),
            None => current,
        };
        if !cwd.is_dir() {
            return Err(ConciseError::UserError(format!(
                "directory '{}' does not exist",
                cwd.display()
            )));
        }

        Ok(Self {
            config_path: config_path.map(|p| cwd.join(p)),
            cwd,
        })
    }

    /// Load the config file.
    ///
    /// An explicit `--config` must exist. Otherwise `.concise-diff.yaml` is
    /// looked up in the repository root (or the working directory outside a
    /// repository) and defaults are used when it is missing.
    pub fn load_config(&self) -> Result<Config> {
        if let Some(path) = &self.config_path {
            return Config::load(path);
        }

        let root = git::repo_root(&self.cwd).unwrap_or_else(|_| self.cwd.clone());
        Config::load_or_default(root.join(DEFAULT_CONFIG_FILE))
    }

    /// Read a path argument relative to the working directory; `-` reads stdin.
    pub fn read_input(&self, path: &Path) -> Result<String> {
        if path.as_os_str() == STDIN_PATH {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ConciseError::UserError(format!("failed to read stdin: {}", e)))?;
            return Ok(buf);
        }

        let full = self.cwd.join(path);
        std::fs::read_to_string(&full).map_err(|e| {
            ConciseError::UserError(format!("failed to read '{}': {}", full.display(), e))
        })
    }
}

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = CommandContext::resolve(cli.directory.as_deref(), cli.config.as_deref())?;
    log::debug!("working directory {}", ctx.cwd.display());

    match cli.command {
        Command::Render(args) => render::cmd_render(&ctx, args),
        Command::Hunks(args) => hunks::cmd_hunks(&ctx, args),
        Command::Local(args) => local::cmd_local(&ctx, args),
    }
}

/// Apply `-B`/`-A` on top of the config values.
fn apply_margins(config: &mut Config, margins: &MarginArgs) {
    if let Some(before) = margins.before {
        config.before_lines = before;
    }
    if let Some(after) = margins.after {
        config.after_lines = after;
    }
}

/// Forward core diagnostics to the log, tagged with the file they concern.
fn log_diagnostic(path: &str) -> impl FnMut(concise_diff::diff::Diagnostic) + '_ {
    move |d| log::warn!("{}: {}", path, d)
}
