//! Schema-driven editability
//!
//! A region is user-editable when its implementation declares a configuration
//! schema. Editable regions are wrapped with the editable-region shell so the
//! overlay can target them; empty placeholders are wrapped with both the
//! empty-region and editable-region shells so they act as drop targets.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::region::{Props, Region, RegionTree};
use crate::registry::{RegionRegistry, ShellNames};
use crate::tree_path::TreePath;

/// Shell applied around a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    /// Placeholder rendered for a region without implementation
    Empty,
    /// Wrapper that makes a region targetable by the overlay
    Editable,
}

/// Output of [`EditabilityResolver::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub enum EditableRegion {
    /// Region is not editable and passes through untouched
    Unchanged(Region),
    /// Region wrapped with editor shells
    Wrapped {
        /// Region after wrapping (props emptied for placeholders)
        region: Region,
        /// Shells applied, outermost last
        shells: Vec<Shell>,
        /// Implementation chain the renderer should compose
        components: Vec<String>,
    },
}

impl EditableRegion {
    /// The (possibly rewritten) region
    #[must_use]
    pub const fn region(&self) -> &Region {
        match self {
            Self::Unchanged(region) | Self::Wrapped { region, .. } => region,
        }
    }

    /// Path of the region
    #[must_use]
    pub const fn path(&self) -> &TreePath {
        &self.region().path
    }

    /// Returns true if the overlay may target this region
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.has_shell(Shell::Editable)
    }

    /// Returns true if this is an empty placeholder turned into a drop target
    #[must_use]
    pub fn is_empty_placeholder(&self) -> bool {
        self.has_shell(Shell::Empty)
    }

    /// Returns true if `shell` was applied
    #[must_use]
    pub fn has_shell(&self, shell: Shell) -> bool {
        matches!(self, Self::Wrapped { shells, .. } if shells.contains(&shell))
    }

    /// Implementation chain to render; a single entry when unchanged
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        match self {
            Self::Unchanged(region) => region.component.iter().cloned().collect(),
            Self::Wrapped { components, .. } => components.clone(),
        }
    }
}

/// Tree after editability injection
#[derive(Debug, Clone)]
pub struct ResolvedTree {
    /// Resolved regions in depth-first order
    pub regions: Vec<EditableRegion>,
    /// Whether the root region itself is editable
    pub root_editable: bool,
}

impl ResolvedTree {
    /// Looks up a resolved region by path
    #[must_use]
    pub fn get(&self, path: &TreePath) -> Option<&EditableRegion> {
        self.regions.iter().find(|r| r.path() == path)
    }
}

/// Pure transform over an immutable registry snapshot
#[derive(Debug, Clone)]
pub struct EditabilityResolver {
    registry: Arc<RegionRegistry>,
    shells: ShellNames,
}

impl EditabilityResolver {
    /// Creates a resolver over a registry snapshot
    #[must_use]
    pub fn new(registry: Arc<RegionRegistry>, shells: ShellNames) -> Self {
        Self { registry, shells }
    }

    /// Registry snapshot this resolver reads
    #[must_use]
    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Resolved shell names
    #[must_use]
    pub const fn shells(&self) -> &ShellNames {
        &self.shells
    }

    /// Returns true if `component` names an implementation with a schema.
    ///
    /// Unknown names are not editable.
    #[must_use]
    pub fn is_editable_component(&self, component: &str) -> bool {
        self.registry.schema(component).is_some()
    }

    /// Decides how a region is presented in edit mode
    #[must_use]
    pub fn resolve(&self, region: &Region) -> EditableRegion {
        match &region.component {
            None => EditableRegion::Wrapped {
                region: Region {
                    props: Props::new(),
                    ..region.clone()
                },
                shells: vec![Shell::Empty, Shell::Editable],
                components: vec![self.shells.empty.clone(), self.shells.editable.clone()],
            },
            Some(component) if self.is_editable_component(component) => EditableRegion::Wrapped {
                region: region.clone(),
                shells: vec![Shell::Editable],
                components: vec![component.clone(), self.shells.editable.clone()],
            },
            Some(_) => EditableRegion::Unchanged(region.clone()),
        }
    }

    /// Resolves every region of a snapshot
    #[must_use]
    pub fn resolve_tree(&self, tree: &RegionTree) -> ResolvedTree {
        let root_editable = tree
            .get(tree.root())
            .and_then(|root| root.component.as_deref())
            .is_some_and(|c| self.is_editable_component(c));

        ResolvedTree {
            regions: tree.iter().map(|r| self.resolve(r)).collect(),
            root_editable,
        }
    }

    /// Names of editable implementations in the registry
    #[must_use]
    pub fn editable_region_names(&self) -> BTreeSet<String> {
        list_editable_region_names(&self.registry, &self.shells)
    }
}

/// Filters the registry to implementations that are not empty-region shells
/// and declare a schema
#[must_use]
pub fn list_editable_region_names(registry: &RegionRegistry, shells: &ShellNames) -> BTreeSet<String> {
    registry
        .iter()
        .filter(|(name, _)| !shells.is_empty_marker(name))
        .filter(|(_, descriptor)| descriptor.is_editable())
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Returns true if the edit-mode toggle control should be offered at all
#[must_use]
pub fn should_offer_edit_toggle(registry: &RegionRegistry, shells: &ShellNames) -> bool {
    !list_editable_region_names(registry, shells).is_empty()
}
