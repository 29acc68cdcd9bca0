//! Hover tracking with a single cancellable removal timer

use std::time::{Duration, Instant};

use crate::tree_path::TreePath;

/// Default grace period before a lost hover is cleared
pub const DEFAULT_HOVER_GRACE: Duration = Duration::from_millis(300);

/// Identifier of an armed removal timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Pending removal of the hovered path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalTimer {
    /// Timer identity, used to discard stale wake-ups
    pub id: TimerId,
    /// When the hover should be cleared
    pub deadline: Instant,
}

/// Hovered path plus at most one outstanding removal timer
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    hovered: Option<TreePath>,
    pending_removal: Option<RemovalTimer>,
    next_timer: u64,
}

impl HoverState {
    /// Creates an empty hover state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered path
    #[must_use]
    pub const fn hovered(&self) -> Option<&TreePath> {
        self.hovered.as_ref()
    }

    /// Outstanding removal timer, if any
    #[must_use]
    pub const fn pending_removal(&self) -> Option<&RemovalTimer> {
        self.pending_removal.as_ref()
    }

    /// Sets the hovered path and cancels any pending removal
    pub fn enter(&mut self, path: TreePath) {
        self.cancel_removal();
        self.hovered = Some(path);
    }

    /// Arms the removal timer, replacing any outstanding one
    pub fn leave(&mut self, now: Instant, grace: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        self.pending_removal = Some(RemovalTimer {
            id,
            deadline: now + grace,
        });
        id
    }

    /// Cancels the outstanding timer, returning it
    pub fn cancel_removal(&mut self) -> Option<RemovalTimer> {
        self.pending_removal.take()
    }

    /// Fires the pending timer if its deadline has passed.
    ///
    /// The timer is consumed, so it fires at most once. Returns true if the
    /// hover was cleared.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.pending_removal {
            Some(timer) if timer.deadline <= now => self.fire(timer.id),
            _ => false,
        }
    }

    /// Fires the timer with the given id.
    ///
    /// Stale ids (cancelled or replaced timers) are ignored.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending_removal.is_some_and(|t| t.id == id) {
            self.pending_removal = None;
            self.hovered = None;
            true
        } else {
            false
        }
    }

    /// Drops the hovered path and any pending timer
    pub fn clear(&mut self) {
        self.pending_removal = None;
        self.hovered = None;
    }

    /// Removes and returns the hovered path, cancelling any pending timer
    pub fn take(&mut self) -> Option<TreePath> {
        self.pending_removal = None;
        self.hovered.take()
    }
}
