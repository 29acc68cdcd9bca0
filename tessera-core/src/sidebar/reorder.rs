//! Sibling reordering from sidebar drag gestures

use super::entries::{SidebarEntry, move_element};
use super::error::ReorderError;
use crate::error::StoreError;
use crate::store::RegionStore;
use crate::tracing::span_names;
use crate::tree_path::{TreePath, equal_parents};

/// What the sidebar is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarMode {
    /// Content editing; rows are not draggable
    Content,
    /// Layout editing; rows can be reordered
    #[default]
    Layout,
}

impl SidebarMode {
    /// Returns true if rows can be dragged in this mode
    #[must_use]
    pub const fn is_sortable(self) -> bool {
        matches!(self, Self::Layout)
    }
}

/// Computes the parent's new child order for moving `from` onto `to`.
///
/// The dragged child takes the drop target's index; everything else keeps
/// its relative order.
///
/// # Errors
///
/// - [`ReorderError::CrossParentReorder`] if the paths have different parents
/// - [`ReorderError::NoOpReorder`] if both paths are the same region
/// - [`ReorderError::NoParent`] for root paths
/// - [`ReorderError::UnknownSibling`] if a leaf name is not in `children`
pub fn compute_sibling_order(
    from: &TreePath,
    to: &TreePath,
    children: &[String],
) -> Result<Vec<String>, ReorderError> {
    if !equal_parents(from, to) {
        return Err(ReorderError::CrossParentReorder {
            from: from.clone(),
            to: to.clone(),
        });
    }
    if from.leaf_name() == to.leaf_name() {
        return Err(ReorderError::NoOpReorder(from.clone()));
    }
    let parent = from.parent().ok_or_else(|| ReorderError::NoParent(from.clone()))?;

    let index_of = |path: &TreePath| {
        children
            .iter()
            .position(|name| name == path.leaf_name())
            .ok_or_else(|| ReorderError::UnknownSibling {
                parent: parent.clone(),
                name: path.leaf_name().to_string(),
            })
    };
    let old_index = index_of(from)?;
    let new_index = index_of(to)?;

    Ok(move_element(children, old_index, new_index))
}

/// Drives the sidebar list and persists sibling reorders.
///
/// The rendered rows only change after the store accepted the new order,
/// so a failed write leaves the list exactly as it was before the drag.
#[derive(Debug, Clone, Default)]
pub struct SiblingReorderController {
    entries: Vec<SidebarEntry>,
    source: Vec<SidebarEntry>,
    is_sorting: bool,
    mode: SidebarMode,
}

impl SiblingReorderController {
    /// Creates a controller showing `entries`
    #[must_use]
    pub fn new(entries: Vec<SidebarEntry>) -> Self {
        Self {
            source: entries.clone(),
            entries,
            is_sorting: false,
            mode: SidebarMode::default(),
        }
    }

    /// Rendered rows
    #[must_use]
    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    /// Returns true while a drag gesture is in progress
    #[must_use]
    pub const fn is_sorting(&self) -> bool {
        self.is_sorting
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> SidebarMode {
        self.mode
    }

    /// Switches mode; any gesture in progress is abandoned
    pub fn set_mode(&mut self, mode: SidebarMode) {
        self.mode = mode;
        if !mode.is_sortable() {
            self.is_sorting = false;
        }
    }

    /// Row index showing `path`
    #[must_use]
    pub fn row_of(&self, path: &TreePath) -> Option<usize> {
        self.entries.iter().position(|e| &e.path == path)
    }

    /// Replaces the rows with freshly derived ones.
    ///
    /// Only takes effect when the input differs from the last one received,
    /// so a re-render with unchanged data keeps the current row order.
    /// Returns true if the rows were replaced.
    pub fn refresh(&mut self, entries: Vec<SidebarEntry>) -> bool {
        if entries == self.source {
            return false;
        }
        self.entries.clone_from(&entries);
        self.source = entries;
        true
    }

    /// A drag gesture started
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::NotSortable`] outside layout mode.
    pub fn begin_gesture(&mut self) -> Result<(), ReorderError> {
        if !self.mode.is_sortable() {
            return Err(ReorderError::NotSortable);
        }
        self.is_sorting = true;
        Ok(())
    }

    /// The drag gesture was abandoned without a drop
    pub fn cancel_gesture(&mut self) {
        self.is_sorting = false;
    }

    /// The drag gesture ended with the row at `old_index` dropped at
    /// `new_index`.
    ///
    /// Ends sorting on every path. Returns the parent's new child order.
    ///
    /// # Errors
    ///
    /// Returns a [`ReorderError`] if no gesture was active, an index is out
    /// of range, the rows are not siblings, or the store rejects the write.
    pub fn end_gesture<S: RegionStore + ?Sized>(
        &mut self,
        store: &mut S,
        old_index: usize,
        new_index: usize,
    ) -> Result<Vec<String>, ReorderError> {
        let was_sorting = std::mem::replace(&mut self.is_sorting, false);
        if !was_sorting {
            return Err(ReorderError::NoGesture);
        }
        if !self.mode.is_sortable() {
            return Err(ReorderError::NotSortable);
        }
        let from = self.path_at(old_index)?;
        let to = self.path_at(new_index)?;
        self.reorder(store, &from, &to)
    }

    fn path_at(&self, index: usize) -> Result<TreePath, ReorderError> {
        self.entries
            .get(index)
            .map(|e| e.path.clone())
            .ok_or(ReorderError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Moves `from` onto `to` within their shared parent.
    ///
    /// The parent's new child order is written to the store first; the
    /// rendered rows are moved only once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns a [`ReorderError`]; quiet rejections
    /// ([`ReorderError::is_quiet`]) leave both store and rows untouched.
    pub fn reorder<S: RegionStore + ?Sized>(
        &mut self,
        store: &mut S,
        from: &TreePath,
        to: &TreePath,
    ) -> Result<Vec<String>, ReorderError> {
        let _span = crate::trace_operation!(span_names::SIDEBAR_REORDER, from = %from, to = %to).entered();

        let result = self.write_order(store, from, to);
        match &result {
            Ok(order) => {
                if let (Some(old), Some(new)) = (self.row_of(from), self.row_of(to)) {
                    self.entries = move_element(&self.entries, old, new);
                }
                tracing::info!(children = ?order, "Sibling order updated");
            }
            Err(err) if err.is_quiet() => tracing::debug!(%err, "Reorder rejected"),
            Err(err) => tracing::warn!(%err, "Reorder failed"),
        }
        result
    }

    fn write_order<S: RegionStore + ?Sized>(
        &self,
        store: &mut S,
        from: &TreePath,
        to: &TreePath,
    ) -> Result<Vec<String>, ReorderError> {
        if !equal_parents(from, to) {
            return Err(ReorderError::CrossParentReorder {
                from: from.clone(),
                to: to.clone(),
            });
        }
        if from == to {
            return Err(ReorderError::NoOpReorder(from.clone()));
        }
        let parent = from.parent().ok_or_else(|| ReorderError::NoParent(from.clone()))?;
        let config = store
            .read(&parent)
            .ok_or_else(|| StoreError::NotFound(parent.to_string()))?;
        let order = compute_sibling_order(from, to, &config.children)?;
        store.write(&parent, config.with_children(order.clone()))?;
        Ok(order)
    }
}
