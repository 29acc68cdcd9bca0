//! In-memory test doubles for host collaborators
//!
//! [`FakeSurface`] stands in for the rendered node tree: it stores tagged
//! nodes with parent links and rectangles, records listener binding, and
//! dispatches pointer events with the host's bubbling rules so tests can
//! check that the innermost region wins. [`RecordingBroadcast`] captures
//! emitted editor events.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

use crate::edit_mode::{Broadcast, EditorEvent};
use crate::overlay::{ClickOutcome, HighlightOverlay, NodeId, Point, Rect, Surface};
use crate::region::RegionTree;
use crate::tree_path::TreePath;

/// Inner padding used by [`FakeSurface::from_tree`] when nesting regions
pub const LAYOUT_PADDING: f64 = 8.0;

#[derive(Debug, Clone)]
struct FakeNode {
    path: TreePath,
    parent: Option<NodeId>,
    rect: Rect,
    bound: bool,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: BTreeMap<NodeId, FakeNode>,
    root: Option<Rect>,
    generation: u64,
    next_id: u64,
    bind_calls: usize,
    unbind_calls: usize,
}

/// In-memory [`Surface`] with bubbling event dispatch
#[derive(Debug, Default)]
pub struct FakeSurface {
    inner: RefCell<Inner>,
}

impl FakeSurface {
    /// Creates an empty surface whose root container occupies `root`
    #[must_use]
    pub fn new(root: Rect) -> Self {
        Self {
            inner: RefCell::new(Inner {
                root: Some(root),
                ..Inner::default()
            }),
        }
    }

    /// Lays out a region tree as nested boxes inside `root`.
    ///
    /// Each region's children split its padded interior into equal
    /// horizontal bands, in configured order.
    #[must_use]
    pub fn from_tree(tree: &RegionTree, root: Rect) -> Self {
        let surface = Self::new(root);
        surface.add_subtree(tree, tree.root(), None, root);
        surface
    }

    /// Drops every node and lays `tree` out again inside the current root
    /// container, as a host does after the configuration changed.
    ///
    /// Node ids are never reused, so ids from the previous layout become
    /// unknown.
    pub fn relayout(&self, tree: &RegionTree) {
        let root = self.inner.borrow().root;
        self.clear();
        if let Some(root) = root {
            self.add_subtree(tree, tree.root(), None, root);
        }
    }

    fn add_subtree(&self, tree: &RegionTree, path: &TreePath, parent: Option<NodeId>, rect: Rect) {
        let node = self.add_node(path.clone(), parent, rect);
        let children = tree.children_of(path);
        if children.is_empty() {
            return;
        }
        let inner_height = (rect.height - 2.0 * LAYOUT_PADDING).max(0.0);
        let band = inner_height / children.len() as f64;
        for (idx, child) in children.iter().enumerate() {
            let child_rect = Rect::new(
                rect.x + LAYOUT_PADDING,
                rect.y + LAYOUT_PADDING + band * idx as f64,
                (rect.width - 2.0 * LAYOUT_PADDING).max(0.0),
                band,
            );
            self.add_subtree(tree, &child.path, Some(node), child_rect);
        }
    }

    /// Adds a tagged node and bumps the generation
    pub fn add_node(&self, path: TreePath, parent: Option<NodeId>, rect: Rect) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        let id = NodeId(inner.next_id);
        inner.next_id += 1;
        inner.generation += 1;
        inner.nodes.insert(
            id,
            FakeNode {
                path,
                parent,
                rect,
                bound: false,
            },
        );
        id
    }

    /// Removes a node (not its descendants) and bumps the generation
    pub fn remove_node(&self, node: NodeId) {
        let mut inner = self.inner.borrow_mut();
        if inner.nodes.remove(&node).is_some() {
            inner.generation += 1;
        }
    }

    /// Removes every node, as when the host re-renders from scratch
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.nodes.clear();
        inner.generation += 1;
    }

    /// Moves a node
    pub fn set_node_rect(&self, node: NodeId, rect: Rect) {
        if let Some(n) = self.inner.borrow_mut().nodes.get_mut(&node) {
            n.rect = rect;
        }
    }

    /// Moves or removes the root container
    pub fn set_root_rect(&self, root: Option<Rect>) {
        self.inner.borrow_mut().root = root;
    }

    /// Returns true if listeners are attached to `node`
    #[must_use]
    pub fn is_bound(&self, node: NodeId) -> bool {
        self.inner.borrow().nodes.get(&node).is_some_and(|n| n.bound)
    }

    /// Nodes with listeners attached
    #[must_use]
    pub fn bound_nodes(&self) -> Vec<NodeId> {
        self.inner
            .borrow()
            .nodes
            .iter()
            .filter(|(_, n)| n.bound)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Total `bind` and `unbind` calls received
    #[must_use]
    pub fn binding_calls(&self) -> (usize, usize) {
        let inner = self.inner.borrow();
        (inner.bind_calls, inner.unbind_calls)
    }

    /// Innermost node containing `point` (host coordinates)
    #[must_use]
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        let inner = self.inner.borrow();
        inner
            .nodes
            .iter()
            .filter(|(_, n)| n.rect.contains(point))
            .max_by_key(|(id, _)| Self::depth(&inner, **id))
            .map(|(id, _)| *id)
    }

    fn depth(inner: &Inner, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = inner.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            depth += 1;
            current = inner.nodes.get(&id).and_then(|n| n.parent);
        }
        depth
    }

    /// `node` followed by its ancestors, innermost first
    fn bubble_path(&self, node: NodeId) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        let mut chain = Vec::new();
        let mut current = inner.nodes.contains_key(&node).then_some(node);
        while let Some(id) = current {
            chain.push(id);
            current = inner.nodes.get(&id).and_then(|n| n.parent);
        }
        chain
    }

    /// Delivers a hover-enter to `node` and bubbles to bound ancestors until
    /// a handler stops propagation. Returns the node that handled it.
    pub fn dispatch_enter(&self, overlay: &mut HighlightOverlay, node: NodeId) -> Option<NodeId> {
        for id in self.bubble_path(node) {
            if !self.is_bound(id) {
                continue;
            }
            if overlay.on_hover_enter(id, self).stop_propagation {
                return Some(id);
            }
        }
        None
    }

    /// Delivers a hover-leave to `node` only (leave events do not bubble)
    pub fn dispatch_leave(&self, overlay: &mut HighlightOverlay, node: NodeId, now: Instant) {
        if self.is_bound(node) {
            overlay.on_hover_leave(node, now);
        }
    }

    /// Delivers a click with bubbling; returns the first handled outcome
    pub fn dispatch_click(&self, overlay: &mut HighlightOverlay, node: NodeId) -> Option<ClickOutcome> {
        for id in self.bubble_path(node) {
            if !self.is_bound(id) {
                continue;
            }
            let outcome = overlay.on_click(id);
            if outcome.response.stop_propagation {
                return Some(outcome);
            }
        }
        None
    }
}

impl Surface for FakeSurface {
    fn tagged_nodes(&self) -> Vec<NodeId> {
        self.inner.borrow().nodes.keys().copied().collect()
    }

    fn node_path(&self, node: NodeId) -> Option<TreePath> {
        self.inner.borrow().nodes.get(&node).map(|n| n.path.clone())
    }

    fn find_node(&self, path: &TreePath) -> Option<NodeId> {
        self.inner
            .borrow()
            .nodes
            .iter()
            .find(|(_, n)| &n.path == path)
            .map(|(id, _)| *id)
    }

    fn node_rect(&self, node: NodeId) -> Option<Rect> {
        self.inner.borrow().nodes.get(&node).map(|n| n.rect)
    }

    fn root_rect(&self) -> Option<Rect> {
        self.inner.borrow().root
    }

    fn bind(&self, node: NodeId) {
        let mut inner = self.inner.borrow_mut();
        inner.bind_calls += 1;
        if let Some(n) = inner.nodes.get_mut(&node) {
            n.bound = true;
        }
    }

    fn unbind(&self, node: NodeId) {
        let mut inner = self.inner.borrow_mut();
        inner.unbind_calls += 1;
        if let Some(n) = inner.nodes.get_mut(&node) {
            n.bound = false;
        }
    }

    fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }
}

/// [`Broadcast`] sink that records every event
#[derive(Debug, Clone, Default)]
pub struct RecordingBroadcast {
    events: Rc<RefCell<Vec<EditorEvent>>>,
}

impl RecordingBroadcast {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far
    #[must_use]
    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.borrow().clone()
    }

    /// Number of events with the given name
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.borrow().iter().filter(|e| e.name() == name).count()
    }
}

impl Broadcast for RecordingBroadcast {
    fn emit(&self, event: &EditorEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{PageDocument, RegionConfig};

    fn path(raw: &str) -> TreePath {
        TreePath::parse(raw).unwrap()
    }

    #[test]
    fn from_tree_nests_children() {
        let mut doc = PageDocument::new(path("store"));
        doc.regions.insert(
            path("store"),
            RegionConfig::with_component("Store").with_children(vec!["a".into(), "b".into()]),
        );
        let tree = RegionTree::build(&doc).unwrap();
        let surface = FakeSurface::from_tree(&tree, Rect::new(0.0, 0.0, 100.0, 116.0));

        let a = surface.find_node(&path("store/a")).unwrap();
        let b = surface.find_node(&path("store/b")).unwrap();
        assert_eq!(surface.node_rect(a), Some(Rect::new(8.0, 8.0, 84.0, 50.0)));
        assert_eq!(surface.node_rect(b), Some(Rect::new(8.0, 58.0, 84.0, 50.0)));
        assert_eq!(surface.node_at(Point::new(50.0, 70.0)), Some(b));
        assert_eq!(surface.node_at(Point::new(2.0, 2.0)), surface.find_node(&path("store")));
    }

    #[test]
    fn relayout_follows_new_child_order() {
        let mut doc = PageDocument::new(path("store"));
        doc.regions.insert(
            path("store"),
            RegionConfig::with_component("Store").with_children(vec!["a".into(), "b".into()]),
        );
        let surface = FakeSurface::from_tree(&RegionTree::build(&doc).unwrap(), Rect::new(0.0, 0.0, 100.0, 116.0));
        let old_a = surface.find_node(&path("store/a")).unwrap();
        let generation = surface.generation();

        doc.regions.insert(
            path("store"),
            RegionConfig::with_component("Store").with_children(vec!["b".into(), "a".into()]),
        );
        surface.relayout(&RegionTree::build(&doc).unwrap());

        let a = surface.find_node(&path("store/a")).unwrap();
        assert_ne!(a, old_a);
        assert!(surface.node_rect(old_a).is_none());
        assert_eq!(surface.node_rect(a), Some(Rect::new(8.0, 58.0, 84.0, 50.0)));
        assert!(surface.generation() > generation);
    }

    #[test]
    fn generation_tracks_structure_changes() {
        let surface = FakeSurface::new(Rect::default());
        let g0 = surface.generation();
        let node = surface.add_node(path("a"), None, Rect::default());
        assert!(surface.generation() > g0);
        let g1 = surface.generation();
        surface.set_node_rect(node, Rect::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(surface.generation(), g1);
        surface.remove_node(node);
        assert!(surface.generation() > g1);
    }

    #[test]
    fn recording_broadcast_counts_by_name() {
        let recorder = RecordingBroadcast::new();
        recorder.emit(&EditorEvent::ExtensionsUpdate);
        recorder.emit(&EditorEvent::ModeChanged { editing: true });
        assert_eq!(recorder.count("extension:*:update"), 1);
        assert_eq!(recorder.events().len(), 2);
    }
}
