//! Highlight overlay
//!
//! A passive layer drawn above the page that outlines the region under the
//! pointer, or the targeted region when nothing is hovered.
//!
//! # Module Structure
//!
//! - `geometry` - `Point` and `Rect`
//! - `surface` - host abstraction (`Surface`) and scoped listener binding
//! - `hover` - hovered path with a single cancellable removal timer
//! - `highlight` - `HighlightOverlay` event handlers and rect computation
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use tessera_core::overlay::{Highlight, HighlightOverlay, Rect, Surface};
//! use tessera_core::testing::FakeSurface;
//! use tessera_core::TreePath;
//!
//! let surface = Rc::new(FakeSurface::new(Rect::new(10.0, 10.0, 800.0, 600.0)));
//! let shelf = surface.add_node(
//!     TreePath::parse("store/shelf").unwrap(),
//!     None,
//!     Rect::new(30.0, 50.0, 100.0, 40.0),
//! );
//! let dyn_surface: Rc<dyn Surface> = surface.clone();
//!
//! let mut overlay = HighlightOverlay::default();
//! overlay.sync_listeners(true, &dyn_surface);
//! overlay.on_hover_enter(shelf, &*surface);
//!
//! assert_eq!(
//!     overlay.highlight(&*surface, None),
//!     Highlight::Region(Rect::new(20.0, 40.0, 100.0, 40.0))
//! );
//! ```

mod geometry;
mod highlight;
mod hover;
mod surface;

pub use geometry::{Point, Rect};
pub use highlight::{ClickOutcome, EventResponse, Highlight, HighlightOverlay};
pub use hover::{DEFAULT_HOVER_GRACE, HoverState, RemovalTimer, TimerId};
pub use surface::{ListenerSubscription, NodeId, Surface};
