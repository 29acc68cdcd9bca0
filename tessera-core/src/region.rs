//! Region configuration and the immutable region tree
//!
//! The page is described by a [`PageDocument`]: a root path plus one
//! [`RegionConfig`] per configured region. [`RegionTree::build`] walks the
//! document from the root through each region's ordered child list and
//! produces a snapshot. Snapshots are shared through [`TreeSnapshot`] and are
//! never edited; a configuration change produces a new snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PathError;
use crate::registry::ImplementationDescriptor;
use crate::tree_path::TreePath;

/// Opaque per-region configuration bag
pub type Props = Map<String, Value>;

/// Stored configuration of one region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Logical implementation name; `None` marks an empty placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Ordered names of direct children
    #[serde(default, rename = "elements", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    /// Implementation-specific properties
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Props,
}

impl RegionConfig {
    /// Creates a configuration for the given implementation
    #[must_use]
    pub fn with_component(component: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::default()
        }
    }

    /// Returns a copy of this configuration with a new child order
    #[must_use]
    pub fn with_children(&self, children: Vec<String>) -> Self {
        Self {
            children,
            ..self.clone()
        }
    }
}

/// Full page description: region configurations plus the implementation
/// registry they refer to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Path of the root region
    pub root: TreePath,
    /// Configured regions, keyed by path
    #[serde(default)]
    pub regions: BTreeMap<TreePath, RegionConfig>,
    /// Known implementations, keyed by logical name
    #[serde(default)]
    pub implementations: BTreeMap<String, ImplementationDescriptor>,
}

impl PageDocument {
    /// Creates an empty document rooted at `root`
    #[must_use]
    pub fn new(root: TreePath) -> Self {
        Self {
            root,
            regions: BTreeMap::new(),
            implementations: BTreeMap::new(),
        }
    }
}

/// One addressable unit of the page
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Address of the region
    pub path: TreePath,
    /// Logical implementation name; `None` marks an empty placeholder
    pub component: Option<String>,
    /// Opaque configuration
    pub props: Props,
    /// Ordered names of direct children
    pub children: Vec<String>,
}

impl Region {
    /// Creates an empty placeholder region
    #[must_use]
    pub fn placeholder(path: TreePath) -> Self {
        Self {
            path,
            component: None,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    fn from_config(path: TreePath, config: &RegionConfig) -> Self {
        Self {
            path,
            component: config.component.clone(),
            props: config.props.clone(),
            children: config.children.clone(),
        }
    }

    /// Display title: `props.title` when it is a string, else the leaf name
    #[must_use]
    pub fn title(&self) -> &str {
        self.props
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_else(|| self.path.leaf_name())
    }
}

/// Shared handle to an immutable tree
pub type TreeSnapshot = Arc<RegionTree>;

/// Immutable snapshot of the page's region tree
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTree {
    root: TreePath,
    regions: BTreeMap<TreePath, Region>,
    /// Depth-first pre-order, siblings in configured order
    order: Vec<TreePath>,
}

impl RegionTree {
    /// Builds a snapshot from a page document.
    ///
    /// Children listed by a region but missing from the document become empty
    /// placeholders. Configured regions unreachable from the root are not part
    /// of the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a child name is not a valid path segment.
    pub fn build(document: &PageDocument) -> Result<Self, PathError> {
        let mut regions = BTreeMap::new();
        let mut order = Vec::new();
        let mut stack = vec![document.root.clone()];

        while let Some(path) = stack.pop() {
            if regions.contains_key(&path) {
                continue;
            }
            let region = match document.regions.get(&path) {
                Some(config) => Region::from_config(path.clone(), config),
                None => Region::placeholder(path.clone()),
            };

            for name in region.children.iter().rev() {
                stack.push(path.join(name)?);
            }
            order.push(path.clone());
            regions.insert(path, region);
        }

        tracing::debug!(root = %document.root, regions = regions.len(), "Region tree built");

        Ok(Self {
            root: document.root.clone(),
            regions,
            order,
        })
    }

    /// Builds a snapshot and wraps it for sharing
    ///
    /// # Errors
    ///
    /// See [`RegionTree::build`].
    pub fn snapshot(document: &PageDocument) -> Result<TreeSnapshot, PathError> {
        Self::build(document).map(Arc::new)
    }

    /// Path of the root region
    #[must_use]
    pub const fn root(&self) -> &TreePath {
        &self.root
    }

    /// Looks up a region by path
    #[must_use]
    pub fn get(&self, path: &TreePath) -> Option<&Region> {
        self.regions.get(path)
    }

    /// Returns true if the tree contains `path`
    #[must_use]
    pub fn contains(&self, path: &TreePath) -> bool {
        self.regions.contains_key(path)
    }

    /// Number of regions
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the tree has no regions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in depth-first pre-order
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.order.iter().filter_map(|p| self.regions.get(p))
    }

    /// Direct children of `path` in configured order
    #[must_use]
    pub fn children_of(&self, path: &TreePath) -> Vec<&Region> {
        self.get(path)
            .map(|region| {
                region
                    .children
                    .iter()
                    .filter_map(|name| path.join(name).ok())
                    .filter_map(|child| self.regions.get(&child))
                    .collect()
            })
            .unwrap_or_default()
    }
}
