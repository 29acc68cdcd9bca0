//! Command handler modules for the CLI.

mod completions;
mod editable;
mod regions;
mod reorder;
mod replay;

use tessera_core::EditorSettings;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(settings: &EditorSettings, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Regions { page, format } => regions::cmd_regions(settings, &page, format),
        Commands::Editable { page, format } => editable::cmd_editable(settings, &page, format),
        Commands::Reorder {
            page,
            from,
            to,
            write,
            format,
        } => reorder::cmd_reorder(
            settings,
            &page,
            reorder::ReorderParams {
                from: &from,
                to: &to,
                write,
                format,
            },
        ),
        Commands::Replay {
            page,
            script,
            format,
        } => replay::cmd_replay(settings, &page, &script, format),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
