//! Sidebar rows derived from the region tree

use crate::editability::EditabilityResolver;
use crate::region::RegionTree;
use crate::tree_path::TreePath;

/// One row of the sidebar region list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    /// Region address
    pub path: TreePath,
    /// Row label
    pub title: String,
    /// Implementation name, if any
    pub component: Option<String>,
    /// Whether the region can be targeted for editing
    pub editable: bool,
}

impl SidebarEntry {
    /// Nesting level below the root (direct children are 1)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.depth()
    }
}

/// Flattens the tree into sidebar rows in depth-first order.
///
/// The root region is the page itself and is not listed.
#[must_use]
pub fn normalize_entries(tree: &RegionTree, resolver: &EditabilityResolver) -> Vec<SidebarEntry> {
    tree.iter()
        .filter(|region| &region.path != tree.root())
        .map(|region| SidebarEntry {
            path: region.path.clone(),
            title: region.title().to_string(),
            component: region.component.clone(),
            editable: resolver.resolve(region).is_editable(),
        })
        .collect()
}

/// Moves the element at `from` to `to`, keeping the relative order of the
/// others. Out-of-range indices leave the list unchanged.
#[must_use]
pub fn move_element<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() || to >= out.len() || from == to {
        return out;
    }
    let item = out.remove(from);
    out.insert(to, item);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::region::{PageDocument, RegionConfig};
    use crate::registry::{ImplementationDescriptor, RegionRegistry, ShellNames};

    fn path(raw: &str) -> TreePath {
        TreePath::parse(raw).unwrap()
    }

    #[test]
    fn move_element_forward_and_back() {
        let items = ["x", "y", "z"];
        assert_eq!(move_element(&items, 0, 1), vec!["y", "x", "z"]);
        assert_eq!(move_element(&items, 0, 2), vec!["y", "z", "x"]);
        assert_eq!(move_element(&items, 2, 0), vec!["z", "x", "y"]);
        assert_eq!(move_element(&items, 1, 1), vec!["x", "y", "z"]);
        assert_eq!(move_element(&items, 5, 0), vec!["x", "y", "z"]);
    }

    #[test]
    fn entries_skip_root_and_mark_editable() {
        let mut doc = PageDocument::new(path("store"));
        doc.regions.insert(
            path("store"),
            RegionConfig::with_component("Store").with_children(vec!["shelf".into(), "slot".into()]),
        );
        doc.regions
            .insert(path("store/shelf"), RegionConfig::with_component("Shelf"));
        let tree = RegionTree::build(&doc).unwrap();
        let registry = RegionRegistry::new().with("Shelf", ImplementationDescriptor::with_schema(json!({})));
        let resolver = EditabilityResolver::new(Arc::new(registry), ShellNames::default());

        let entries = normalize_entries(&tree, &resolver);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, path("store/shelf"));
        assert!(entries[0].editable);
        assert_eq!(entries[1].title, "slot");
        assert!(entries[1].editable, "empty placeholders are drop targets");
        assert_eq!(entries[1].depth(), 1);
    }
}
