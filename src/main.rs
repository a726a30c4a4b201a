//! concise-diff: compact, scope-aware renderings of unified diffs.
//!
//! This is the main entry point for the `concise-diff` CLI. It sets up
//! logging, parses arguments, dispatches to the appropriate command handler,
//! and handles errors with proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use concise_diff::exit_codes;
use env_logger::Env;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
