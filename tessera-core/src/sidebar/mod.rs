//! Sidebar region list and drag-to-reorder
//!
//! The sidebar lists every region of the page. Hovering a row previews the
//! region on the page, clicking it targets the region, and in layout mode
//! rows can be dragged to reorder siblings.
//!
//! # Module Structure
//!
//! - `entries` - `SidebarEntry` rows derived from the region tree
//! - `reorder` - `compute_sibling_order` and `SiblingReorderController`
//! - `error` - `ReorderError`
//!
//! # Example
//!
//! ```
//! use tessera_core::sidebar::compute_sibling_order;
//! use tessera_core::TreePath;
//!
//! let from = TreePath::parse("page/x").unwrap();
//! let to = TreePath::parse("page/y").unwrap();
//! let children = vec!["x".to_string(), "y".to_string(), "z".to_string()];
//!
//! let order = compute_sibling_order(&from, &to, &children).unwrap();
//! assert_eq!(order, ["y", "x", "z"]);
//! ```

mod entries;
mod error;
mod reorder;

pub use entries::{SidebarEntry, move_element, normalize_entries};
pub use error::ReorderError;
pub use reorder::{SiblingReorderController, SidebarMode, compute_sibling_order};
