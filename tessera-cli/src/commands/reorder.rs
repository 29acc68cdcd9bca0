//! Reorder siblings command.

use std::path::Path;

use serde_json::json;
use tessera_core::{
    EditorSession, EditorSettings, InMemoryRegionStore, NoopBroadcast, TreePath, save_page,
};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{layout_surface, open_page, print_json, registry_for};

/// Parameters for the reorder command
pub struct ReorderParams<'a> {
    pub from: &'a TreePath,
    pub to: &'a TreePath,
    pub write: bool,
    pub format: OutputFormat,
}

/// Reorder siblings command handler
pub fn cmd_reorder(settings: &EditorSettings, page: &Path, params: ReorderParams<'_>) -> Result<(), CliError> {
    let document = open_page(page)?;
    let registry = registry_for(&document);
    let surface = layout_surface(&document)?;
    let mut session = EditorSession::new(
        InMemoryRegionStore::new(document),
        registry,
        settings,
        surface,
        NoopBroadcast,
    )?;

    let order = session.reorder(params.from, params.to)?;

    if params.write {
        save_page(page, session.store().document())?;
        tracing::info!(page = %page.display(), "Page document updated");
    }

    match params.format {
        OutputFormat::Table => {
            let parent = params.from.parent().map_or_else(String::new, |p| p.to_string());
            println!("New order under {parent}:");
            for (idx, name) in order.iter().enumerate() {
                println!("  {}. {name}", idx + 1);
            }
            if params.write {
                println!("Saved to {}", page.display());
            }
        }
        OutputFormat::Json => print_json(&json!({
            "parent": params.from.parent().map(|p| p.to_string()),
            "children": order,
            "written": params.write,
        }))?,
    }
    Ok(())
}
