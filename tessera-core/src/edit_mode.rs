//! Edit-mode state machine
//!
//! [`EditModeController`] is the single owner of the session's edit mode and
//! targeted region. All writes go through [`EditModeController::toggle_edit_mode`]
//! and [`EditModeController::set_targeted_path`]; consumers only get read
//! access. Every transition is announced on a [`Broadcast`] channel so that
//! dependent views (the toggle button, region chrome) can refresh.

use std::fmt;

use tokio::sync::broadcast;

use crate::tree_path::TreePath;

/// Notification emitted on edit-state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Regions should refresh their rendering
    ExtensionsUpdate,
    /// Edit mode was switched on or off
    ModeChanged {
        /// New value of the edit-mode flag
        editing: bool,
    },
    /// The targeted region changed
    TargetChanged {
        /// New target, if any
        path: Option<TreePath>,
    },
}

impl EditorEvent {
    /// Event name as seen by listeners keyed on strings
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ExtensionsUpdate => "extension:*:update",
            Self::ModeChanged { .. } => "editor:mode",
            Self::TargetChanged { .. } => "editor:target",
        }
    }
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fire-and-forget notification sink
pub trait Broadcast {
    /// Emits an event; delivery is not acknowledged
    fn emit(&self, event: &EditorEvent);
}

impl Broadcast for broadcast::Sender<EditorEvent> {
    fn emit(&self, event: &EditorEvent) {
        // No receivers is a normal state, not a failure
        if self.send(event.clone()).is_err() {
            tracing::trace!(event = %event, "Broadcast without subscribers");
        }
    }
}

/// Broadcast sink that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcast;

impl Broadcast for NoopBroadcast {
    fn emit(&self, _event: &EditorEvent) {}
}

/// Edit state of the session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    /// Normal browsing; nothing is targeted
    #[default]
    Viewing,
    /// Edit mode with an optional targeted region
    Editing {
        /// Region selected for editing
        targeted: Option<TreePath>,
    },
}

/// Owner of the edit-mode flag and targeted path
pub struct EditModeController<B: Broadcast = broadcast::Sender<EditorEvent>> {
    state: EditState,
    broadcast: B,
}

impl<B: Broadcast> EditModeController<B> {
    /// Creates a controller in [`EditState::Viewing`]
    #[must_use]
    pub fn new(broadcast: B) -> Self {
        Self {
            state: EditState::Viewing,
            broadcast,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &EditState {
        &self.state
    }

    /// Returns true while editing
    #[must_use]
    pub const fn edit_mode(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Targeted region; always `None` while viewing
    #[must_use]
    pub const fn targeted_path(&self) -> Option<&TreePath> {
        match &self.state {
            EditState::Editing { targeted } => targeted.as_ref(),
            EditState::Viewing => None,
        }
    }

    /// Broadcast sink
    #[must_use]
    pub const fn broadcast(&self) -> &B {
        &self.broadcast
    }

    /// Switches between viewing and editing.
    ///
    /// Entering `Viewing` drops the targeted path. Returns the new edit-mode
    /// flag.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.state = match self.state {
            EditState::Viewing => EditState::Editing { targeted: None },
            EditState::Editing { .. } => EditState::Viewing,
        };
        let editing = self.edit_mode();

        tracing::info!(editing, "Edit mode toggled");

        self.broadcast.emit(&EditorEvent::ModeChanged { editing });
        self.broadcast.emit(&EditorEvent::ExtensionsUpdate);
        editing
    }

    /// Replaces the targeted path.
    ///
    /// Ignored while viewing. Returns true if the target changed.
    pub fn set_targeted_path(&mut self, path: Option<TreePath>) -> bool {
        let EditState::Editing { targeted } = &mut self.state else {
            tracing::debug!(path = ?path, "Target ignored outside edit mode");
            return false;
        };
        if *targeted == path {
            return false;
        }
        targeted.clone_from(&path);

        tracing::debug!(path = ?path, "Targeted region changed");

        self.broadcast.emit(&EditorEvent::TargetChanged { path });
        true
    }
}

impl<B: Broadcast + Default> Default for EditModeController<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: Broadcast> fmt::Debug for EditModeController<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditModeController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> TreePath {
        TreePath::parse(raw).unwrap()
    }

    #[test]
    fn starts_viewing() {
        let controller = EditModeController::new(NoopBroadcast);
        assert!(!controller.edit_mode());
        assert!(controller.targeted_path().is_none());
    }

    #[test]
    fn toggle_off_clears_target() {
        let mut controller = EditModeController::new(NoopBroadcast);
        assert!(controller.toggle_edit_mode());
        assert!(controller.set_targeted_path(Some(path("store/home"))));
        assert_eq!(controller.targeted_path(), Some(&path("store/home")));

        assert!(!controller.toggle_edit_mode());
        assert!(controller.targeted_path().is_none());

        controller.toggle_edit_mode();
        assert!(controller.targeted_path().is_none());
    }

    #[test]
    fn targeting_while_viewing_is_a_noop() {
        let mut controller = EditModeController::new(NoopBroadcast);
        assert!(!controller.set_targeted_path(Some(path("store/home"))));
        assert_eq!(controller.state(), &EditState::Viewing);
    }

    #[test]
    fn same_target_does_not_notify() {
        let (tx, mut rx) = broadcast::channel(16);
        let mut controller = EditModeController::new(tx);
        controller.toggle_edit_mode();
        controller.set_targeted_path(Some(path("a")));
        assert!(!controller.set_targeted_path(Some(path("a"))));

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            events,
            vec![
                EditorEvent::ModeChanged { editing: true },
                EditorEvent::ExtensionsUpdate,
                EditorEvent::TargetChanged { path: Some(path("a")) },
            ]
        );
    }

    #[test]
    fn broadcast_without_receivers_is_fine() {
        let (tx, rx) = broadcast::channel(4);
        drop(rx);
        let mut controller = EditModeController::new(tx);
        assert!(controller.toggle_edit_mode());
    }

    #[test]
    fn event_names() {
        assert_eq!(EditorEvent::ExtensionsUpdate.to_string(), "extension:*:update");
        assert_eq!(EditorEvent::ModeChanged { editing: true }.name(), "editor:mode");
    }
}
