//! Host surface abstraction and scoped listener subscriptions
//!
//! The overlay never touches the host's node tree directly. It reads node
//! paths and rectangles through [`Surface`] and asks the host to bind or
//! unbind its pointer listeners. Binding is scoped: a [`ListenerSubscription`]
//! binds every tagged node when created and unbinds them when dropped, so
//! leaving edit mode, rebinding after the tree changed, and tearing down the
//! overlay all release listeners the same way.

use std::fmt;
use std::rc::Rc;

use super::geometry::Rect;
use crate::tree_path::TreePath;

/// Host-side identifier of a node tagged with a region path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// The host's rendered node tree, as seen by the overlay.
///
/// Methods take `&self`; hosts keep their mutable state behind interior
/// mutability since everything runs on one event loop.
pub trait Surface {
    /// Every node currently tagged with a region path
    fn tagged_nodes(&self) -> Vec<NodeId>;

    /// Region path a node is tagged with
    fn node_path(&self, node: NodeId) -> Option<TreePath>;

    /// Node tagged with `path`, if it is currently rendered
    fn find_node(&self, path: &TreePath) -> Option<NodeId>;

    /// Bounding rectangle of a node in host coordinates
    fn node_rect(&self, node: NodeId) -> Option<Rect>;

    /// Bounding rectangle of the root container in host coordinates
    fn root_rect(&self) -> Option<Rect>;

    /// Attaches hover, leave and click listeners and shows a pointer cursor
    fn bind(&self, node: NodeId);

    /// Detaches listeners and restores the cursor; unknown nodes are ignored
    fn unbind(&self, node: NodeId);

    /// Counter bumped whenever the set of tagged nodes changes
    fn generation(&self) -> u64;
}

/// Listeners bound to a fixed set of nodes, released on drop
pub struct ListenerSubscription {
    surface: Rc<dyn Surface>,
    nodes: Vec<NodeId>,
    generation: u64,
}

impl ListenerSubscription {
    /// Binds listeners to every node currently tagged on `surface`
    #[must_use]
    pub fn acquire(surface: Rc<dyn Surface>) -> Self {
        let generation = surface.generation();
        let nodes = surface.tagged_nodes();
        for node in &nodes {
            surface.bind(*node);
        }
        tracing::debug!(nodes = nodes.len(), generation, "Overlay listeners bound");
        Self {
            surface,
            nodes,
            generation,
        }
    }

    /// Returns true if `node` is covered by this subscription
    #[must_use]
    pub fn covers(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Returns true if the surface changed since the subscription was taken
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.surface.generation() != self.generation
    }

    /// Number of bound nodes
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Drop for ListenerSubscription {
    fn drop(&mut self) {
        for node in &self.nodes {
            self.surface.unbind(*node);
        }
        tracing::debug!(nodes = self.nodes.len(), "Overlay listeners released");
    }
}

impl fmt::Debug for ListenerSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSubscription")
            .field("nodes", &self.nodes)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
