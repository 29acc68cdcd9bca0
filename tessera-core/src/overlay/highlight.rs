//! Pointer-driven highlight overlay

use std::rc::Rc;
use std::time::{Duration, Instant};

use super::geometry::{Point, Rect};
use super::hover::{DEFAULT_HOVER_GRACE, HoverState};
use super::surface::{ListenerSubscription, NodeId, Surface};
use crate::tree_path::TreePath;

/// What the overlay layer should draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Highlight {
    /// Outline around a region, relative to the root container
    Region(Rect),
    /// Nothing addressed: zero-size rectangle at the last pointer position
    Idle(Rect),
    /// Addressed node is not rendered; draw nothing
    Hidden,
}

impl Highlight {
    /// Rectangle to position the overlay at, if anything is drawn
    #[must_use]
    pub const fn rect(&self) -> Option<Rect> {
        match self {
            Self::Region(rect) | Self::Idle(rect) => Some(*rect),
            Self::Hidden => None,
        }
    }

    /// Returns true if a region outline is shown
    #[must_use]
    pub const fn is_region(&self) -> bool {
        matches!(self, Self::Region(_))
    }
}

/// How the host should treat a delivered pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Do not deliver the event to ancestor nodes
    pub stop_propagation: bool,
    /// Suppress the host's default action (e.g. link navigation)
    pub prevent_default: bool,
}

impl EventResponse {
    /// Let the event continue to ancestors
    pub const PROPAGATE: Self = Self {
        stop_propagation: false,
        prevent_default: false,
    };

    /// Handled here; stop at this node
    pub const STOP: Self = Self {
        stop_propagation: true,
        prevent_default: false,
    };

    /// Handled here; stop and cancel the default action
    pub const CONSUME: Self = Self {
        stop_propagation: true,
        prevent_default: true,
    };
}

/// Result of a click on a tagged node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Propagation handling
    pub response: EventResponse,
    /// Path to commit as the targeted region; `None` when the click was not
    /// handled by the overlay
    pub commit: Option<Option<TreePath>>,
}

/// Tracks the region under the pointer and computes its highlight rectangle
#[derive(Debug)]
pub struct HighlightOverlay {
    hover: HoverState,
    grace: Duration,
    last_pointer: Point,
    subscription: Option<ListenerSubscription>,
    suppressed: bool,
}

impl Default for HighlightOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_GRACE)
    }
}

impl HighlightOverlay {
    /// Creates an overlay with the given hover grace period
    #[must_use]
    pub fn new(grace: Duration) -> Self {
        Self {
            hover: HoverState::new(),
            grace,
            last_pointer: Point::default(),
            subscription: None,
            suppressed: false,
        }
    }

    /// Grace period before a lost hover is cleared
    #[must_use]
    pub const fn grace(&self) -> Duration {
        self.grace
    }

    /// Currently hovered path
    #[must_use]
    pub const fn hovered_path(&self) -> Option<&TreePath> {
        self.hover.hovered()
    }

    /// Hover state, for inspection
    #[must_use]
    pub const fn hover_state(&self) -> &HoverState {
        &self.hover
    }

    /// Last pointer position relative to the root container
    #[must_use]
    pub const fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    /// Returns true while listeners are bound
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    /// Returns true while hover handling is suppressed
    #[must_use]
    pub const fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Binds or releases listeners to match `edit_mode` and the surface.
    ///
    /// Called after every edit-mode change and every render. While editing,
    /// listeners are rebound whenever the surface's tagged nodes changed.
    /// Leaving edit mode releases them and drops any hover.
    pub fn sync_listeners(&mut self, edit_mode: bool, surface: &Rc<dyn Surface>) {
        if !edit_mode {
            if self.subscription.take().is_some() {
                self.hover.clear();
            }
            return;
        }
        let fresh = self.subscription.as_ref().is_some_and(|s| !s.is_stale());
        if !fresh {
            // Release before rebinding so nodes present in both sets end up bound
            self.subscription = None;
            self.subscription = Some(ListenerSubscription::acquire(Rc::clone(surface)));
        }
    }

    /// Releases all listeners and hover state
    pub fn detach(&mut self) {
        self.subscription = None;
        self.hover.clear();
    }

    /// Ignores pointer hover while set (e.g. during a drag gesture)
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
        if suppressed {
            self.hover.clear();
        }
    }

    fn is_bound(&self, node: NodeId) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.covers(node))
    }

    /// Pointer entered a tagged node
    pub fn on_hover_enter(&mut self, node: NodeId, surface: &dyn Surface) -> EventResponse {
        if !self.is_bound(node) || self.suppressed {
            return EventResponse::PROPAGATE;
        }
        let Some(path) = surface.node_path(node) else {
            return EventResponse::PROPAGATE;
        };
        tracing::trace!(path = %path, "Hover enter");
        self.hover.enter(path);
        EventResponse::STOP
    }

    /// Pointer left a tagged node; arms the removal timer
    pub fn on_hover_leave(&mut self, node: NodeId, now: Instant) {
        if !self.is_bound(node) {
            return;
        }
        self.hover.leave(now, self.grace);
    }

    /// Click on a tagged node; returns the path to commit as targeted
    pub fn on_click(&mut self, node: NodeId) -> ClickOutcome {
        if !self.is_bound(node) {
            return ClickOutcome {
                response: EventResponse::PROPAGATE,
                commit: None,
            };
        }
        let committed = self.hover.take();
        tracing::debug!(path = ?committed, "Region clicked");
        ClickOutcome {
            response: EventResponse::CONSUME,
            commit: Some(committed),
        }
    }

    /// Records the raw pointer position; tracked in and out of edit mode
    pub fn on_pointer_move(&mut self, position: Point, surface: &dyn Surface) {
        self.last_pointer = match surface.root_rect() {
            Some(root) => Point::new(position.x - root.x, position.y - root.y),
            None => position,
        };
    }

    /// Highlights `path` without pointer involvement (sidebar row hover)
    pub fn preview(&mut self, path: Option<TreePath>) {
        match path {
            Some(path) => self.hover.enter(path),
            None => self.hover.clear(),
        }
    }

    /// Fires the removal timer if due; returns true if the hover was cleared
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        let fired = self.hover.fire_due(now);
        if fired {
            tracing::trace!("Hover removed after grace period");
        }
        fired
    }

    /// Deadline of the outstanding removal timer
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hover.pending_removal().map(|t| t.deadline)
    }

    /// Path the overlay currently addresses: hover first, then `targeted`
    #[must_use]
    pub fn effective_path<'a>(&'a self, targeted: Option<&'a TreePath>) -> Option<&'a TreePath> {
        self.hover.hovered().or(targeted)
    }

    /// Computes what to draw
    #[must_use]
    pub fn highlight(&self, surface: &dyn Surface, targeted: Option<&TreePath>) -> Highlight {
        let Some(path) = self.effective_path(targeted) else {
            return Highlight::Idle(Rect::zero_at(self.last_pointer));
        };
        let rect = surface
            .find_node(path)
            .and_then(|node| surface.node_rect(node))
            .zip(surface.root_rect())
            .map(|(node, root)| node.relative_to(&root));

        match rect {
            Some(rect) => Highlight::Region(rect),
            None => {
                tracing::trace!(path = %path, "Addressed region is not rendered");
                Highlight::Hidden
            }
        }
    }
}
