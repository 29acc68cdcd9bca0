//! `Tessera` CLI - command-line interface for the Tessera page editor
//!
//! Loads page documents and runs the editor core against them: listing
//! regions and editable implementations, reordering siblings, and replaying
//! scripted editor sessions.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use tessera_core::{TracingLevel, TracingOutput, init_tracing};

fn main() {
    let cli = Cli::parse();

    let settings = match util::load_settings(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    let verbose = cli.verbose > 0 && !cli.quiet;
    if verbose || cli.log_file.is_some() || settings.logging.file.is_some() {
        let mut config = settings.tracing_config();
        if verbose {
            config = config.with_level(match cli.verbose {
                1 => TracingLevel::Info,
                2 => TracingLevel::Debug,
                _ => TracingLevel::Trace,
            });
        }
        if let Some(path) = cli.log_file.clone() {
            config = config.with_output(TracingOutput::File { path });
        }
        if let Err(e) = init_tracing(&config) {
            eprintln!("Warning: {e}");
        }
    }

    let result = commands::dispatch(&settings, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
