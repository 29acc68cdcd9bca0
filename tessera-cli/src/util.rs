//! Shared utility functions used across command modules.

use std::path::Path;
use std::rc::Rc;

use serde::Serialize;
use tessera_core::testing::FakeSurface;
use tessera_core::{
    EditorSettings, PageDocument, Rect, RegionRegistry, RegionTree, TreePath, load_page,
};

use crate::error::CliError;

/// Viewport used when laying out a page without a real host
pub const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1024.0, 768.0);

/// Loads settings from `path`, or from the default location when unset.
pub fn load_settings(path: Option<&Path>) -> Result<EditorSettings, CliError> {
    let settings = match path {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::load_default()?,
    };
    Ok(settings)
}

/// Loads a page document.
pub fn open_page(path: &Path) -> Result<PageDocument, CliError> {
    load_page(path).map_err(|e| CliError::Page(e.to_string()))
}

/// Registry of the implementations declared by a page document.
pub fn registry_for(document: &PageDocument) -> RegionRegistry {
    RegionRegistry::from(document.implementations.clone())
}

/// Lays the page out as nested boxes inside [`VIEWPORT`].
pub fn layout_surface(document: &PageDocument) -> Result<Rc<FakeSurface>, CliError> {
    let tree = RegionTree::build(document).map_err(|e| CliError::Page(e.to_string()))?;
    Ok(Rc::new(FakeSurface::from_tree(&tree, VIEWPORT)))
}

/// Parses a tree path argument
pub fn parse_tree_path(s: &str) -> Result<TreePath, String> {
    TreePath::parse(s).map_err(|e| e.to_string())
}

/// Prints a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_path_argument() {
        assert_eq!(parse_tree_path("page/x").unwrap().leaf_name(), "x");
        assert!(parse_tree_path("page//x").is_err());
    }

    #[test]
    fn missing_settings_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = load_settings(Some(&dir.path().join("none.toml"))).unwrap();
        assert_eq!(settings, EditorSettings::default());
    }
}
