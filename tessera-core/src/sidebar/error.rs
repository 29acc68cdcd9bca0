//! Error types for sidebar reordering

use crate::error::StoreError;
use crate::tree_path::TreePath;

/// Reasons a sibling reorder is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// The two regions have different parents.
    #[error("cannot reorder `{from}` relative to `{to}`: regions have different parents")]
    CrossParentReorder {
        /// Dragged region
        from: TreePath,
        /// Drop target
        to: TreePath,
    },

    /// The region was dropped onto itself.
    #[error("`{0}` was dropped onto itself")]
    NoOpReorder(TreePath),

    /// A name is not among the parent's configured children.
    #[error("`{name}` is not a child of `{parent}`")]
    UnknownSibling {
        /// Parent region
        parent: TreePath,
        /// Missing child name
        name: String,
    },

    /// Root regions have no parent list to reorder.
    #[error("`{0}` has no parent region")]
    NoParent(TreePath),

    /// The sidebar is not in layout mode.
    #[error("reordering is only available in layout mode")]
    NotSortable,

    /// A gesture ended without having started.
    #[error("no drag gesture in progress")]
    NoGesture,

    /// A row index does not exist in the rendered list.
    #[error("row {index} out of range ({len} rows)")]
    IndexOutOfRange {
        /// Requested row
        index: usize,
        /// Number of rows
        len: usize,
    },

    /// The store rejected the new order.
    #[error("failed to store new order: {0}")]
    Store(#[from] StoreError),
}

impl ReorderError {
    /// Returns true for expected rejections that should only revert the
    /// gesture visually, without an error notice.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        matches!(
            self,
            Self::CrossParentReorder { .. } | Self::NoOpReorder(_) | Self::NotSortable | Self::NoGesture
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> TreePath {
        TreePath::parse(raw).unwrap()
    }

    #[test]
    fn expected_rejections_are_quiet() {
        assert!(ReorderError::NoOpReorder(path("a/x")).is_quiet());
        assert!(
            ReorderError::CrossParentReorder {
                from: path("a/x"),
                to: path("b/y"),
            }
            .is_quiet()
        );
        assert!(!ReorderError::Store(StoreError::NotFound("a".into())).is_quiet());
        assert!(!ReorderError::IndexOutOfRange { index: 3, len: 2 }.is_quiet());
    }

    #[test]
    fn display_mentions_paths() {
        let err = ReorderError::CrossParentReorder {
            from: path("a/x"),
            to: path("b/y"),
        };
        let text = err.to_string();
        assert!(text.contains("a/x"));
        assert!(text.contains("b/y"));
    }
}
