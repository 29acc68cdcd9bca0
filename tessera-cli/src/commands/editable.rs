//! List editable implementations command.

use std::path::Path;

use tessera_core::{EditorSettings, ShellNames, list_editable_region_names};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{open_page, print_json, registry_for};

/// List editable implementations command handler
pub fn cmd_editable(settings: &EditorSettings, page: &Path, format: OutputFormat) -> Result<(), CliError> {
    let document = open_page(page)?;
    let registry = registry_for(&document);
    let shells = ShellNames::discover(&registry, &settings.shell_patterns)?;
    let names = list_editable_region_names(&registry, &shells);

    match format {
        OutputFormat::Table => {
            if names.is_empty() {
                println!("No editable implementations; edit mode would not be offered.");
            }
            for name in &names {
                let title = registry.get(name).and_then(|d| d.title.as_deref());
                match title {
                    Some(title) => println!("{name}  ({title})"),
                    None => println!("{name}"),
                }
            }
        }
        OutputFormat::Json => print_json(&names)?,
    }
    Ok(())
}
