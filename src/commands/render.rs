//! Implementation of the `concise-diff render` command.

use super::{CommandContext, STDIN_PATH, apply_margins, log_diagnostic};
use crate::cli::RenderArgs;
use concise_diff::diff::{make_concise_file_with, parse_patch_with, ConciseFileParams};
use concise_diff::error::{ConciseError, Result};

/// Execute the `concise-diff render` command.
///
/// Prints the concise view of one file. Margins and the elision marker
/// come from the config file unless given on the command line.
pub fn cmd_render(ctx: &CommandContext, args: RenderArgs) -> Result<()> {
    if args.patch.as_os_str() == STDIN_PATH && args.file.as_os_str() == STDIN_PATH {
        return Err(ConciseError::UserError(
            "--patch and --file cannot both read from stdin".to_string(),
        ));
    }

    let mut config = ctx.load_config()?;
    apply_margins(&mut config, &args.margins);
    if let Some(marker) = args.marker {
        config.elision_marker = marker;
    }
    config.validate()?;

    let patch_text = ctx.read_input(&args.patch)?;
    let file_content = ctx.read_input(&args.file)?;

    let file_label = args.file.display().to_string();
    let mut on_diagnostic = log_diagnostic(&file_label);

    let parsed = parse_patch_with(&patch_text, &mut on_diagnostic);
    let params = ConciseFileParams {
        margins: config.margins(),
        render: config.render_options(),
        ..ConciseFileParams::new(&parsed, &file_content)
    };

    println!("{}", make_concise_file_with(params, &mut on_diagnostic));
    Ok(())
}
