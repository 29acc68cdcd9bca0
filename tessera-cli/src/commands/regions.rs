//! List regions command.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tessera_core::{
    EditabilityResolver, EditorSettings, RegionTree, ShellNames, SidebarEntry, normalize_entries,
};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{open_page, print_json, registry_for};

#[derive(Serialize)]
struct RegionRow<'a> {
    path: &'a str,
    title: &'a str,
    component: Option<&'a str>,
    editable: bool,
    depth: usize,
}

impl<'a> From<&'a SidebarEntry> for RegionRow<'a> {
    fn from(entry: &'a SidebarEntry) -> Self {
        Self {
            path: entry.path.as_str(),
            title: &entry.title,
            component: entry.component.as_deref(),
            editable: entry.editable,
            depth: entry.depth(),
        }
    }
}

/// List regions command handler
pub fn cmd_regions(settings: &EditorSettings, page: &Path, format: OutputFormat) -> Result<(), CliError> {
    let document = open_page(page)?;
    let registry = registry_for(&document);
    let shells = ShellNames::discover(&registry, &settings.shell_patterns)?;
    let resolver = EditabilityResolver::new(Arc::new(registry), shells);
    let tree = RegionTree::build(&document).map_err(|e| CliError::Page(e.to_string()))?;
    let entries = normalize_entries(&tree, &resolver);

    match format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => {
            let rows: Vec<RegionRow<'_>> = entries.iter().map(RegionRow::from).collect();
            print_json(&rows)?;
        }
    }
    Ok(())
}

fn print_table(entries: &[SidebarEntry]) {
    if entries.is_empty() {
        println!("No regions below the page root.");
        return;
    }

    let label = |e: &SidebarEntry| format!("{}{}", "  ".repeat(e.depth().saturating_sub(1)), e.title);
    let title_width = entries.iter().map(|e| label(e).len()).max().unwrap_or(5).max(5);
    let path_width = entries.iter().map(|e| e.path.as_str().len()).max().unwrap_or(4).max(4);

    println!("{:<title_width$}  {:<path_width$}  {:<8}  COMPONENT", "TITLE", "PATH", "EDITABLE");
    for entry in entries {
        println!(
            "{:<title_width$}  {:<path_width$}  {:<8}  {}",
            label(entry),
            entry.path,
            if entry.editable { "yes" } else { "no" },
            entry.component.as_deref().unwrap_or("(empty)"),
        );
    }
}
