//! Tessera Core Library
//!
//! GUI-free core of the Tessera live page editor: tree-path addressing and
//! schema-driven editability of page regions, the pointer-driven highlight
//! overlay, and drag-reordering of sibling regions from the sidebar.
//!
//! # Crate Structure
//!
//! - [`tree_path`] - `/`-delimited region addresses
//! - [`region`] - Region configuration, page documents and tree snapshots
//! - [`registry`] - Implementation registry and shell discovery
//! - [`editability`] - Editable/empty region detection and shell wrapping
//! - [`edit_mode`] - Edit-mode state machine and notifications
//! - [`overlay`] - Hover tracking, listener binding and highlight geometry
//! - [`sidebar`] - Sidebar rows and sibling reordering
//! - [`store`] - Region-configuration store
//! - [`session`] - Input routing and the single-task event loop
//! - [`config`] - Editor settings and page document files
//! - [`tracing`] - Structured logging setup
//! - [`testing`] - In-memory host surface and broadcast recorder

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod edit_mode;
pub mod editability;
pub mod error;
pub mod overlay;
pub mod region;
pub mod registry;
pub mod session;
pub mod sidebar;
pub mod store;
pub mod testing;
pub mod tracing;
pub mod tree_path;

pub use config::{
    DocumentFormat, EditorSettings, LoggingSettings, default_settings_path, load_page, save_page,
};
pub use edit_mode::{Broadcast, EditModeController, EditState, EditorEvent, NoopBroadcast};
pub use editability::{
    EditabilityResolver, EditableRegion, ResolvedTree, Shell, list_editable_region_names,
    should_offer_edit_toggle,
};
pub use error::{ConfigError, ConfigResult, PathError, StoreError, TesseraError};
pub use overlay::{
    ClickOutcome, EventResponse, Highlight, HighlightOverlay, HoverState, ListenerSubscription,
    NodeId, Point, Rect, Surface,
};
pub use region::{PageDocument, Props, Region, RegionConfig, RegionTree, TreeSnapshot};
pub use registry::{ImplementationDescriptor, RegionRegistry, ShellNames, ShellPatterns};
pub use session::{EditorInput, EditorSession, PointerEvent, run_event_loop, run_event_loop_with};
pub use sidebar::{
    ReorderError, SiblingReorderController, SidebarEntry, SidebarMode, compute_sibling_order,
    normalize_entries,
};
pub use store::{InMemoryRegionStore, RegionStore};
pub use tracing::{TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing};
pub use tree_path::{TreePath, equal_parents, leaf_name, parent};
