//! Editor session: one instance of every controller plus input routing
//!
//! [`EditorSession`] owns the edit-mode controller, the highlight overlay,
//! the sidebar controller and the store, and routes host inputs
//! ([`EditorInput`]) to them in arrival order. [`run_event_loop`] drives a
//! session from a channel on the current task and fires the hover-removal
//! timer when it comes due.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, mpsc};

use crate::config::EditorSettings;
use crate::edit_mode::{Broadcast, EditModeController, EditorEvent};
use crate::editability::{EditabilityResolver, ResolvedTree, should_offer_edit_toggle};
use crate::error::TesseraError;
use crate::overlay::{EventResponse, Highlight, HighlightOverlay, NodeId, Point, Surface};
use crate::region::TreeSnapshot;
use crate::registry::{RegionRegistry, ShellNames};
use crate::sidebar::{ReorderError, SiblingReorderController, SidebarMode, normalize_entries};
use crate::store::RegionStore;
use crate::tracing::span_names;
use crate::tree_path::TreePath;

/// Pointer event delivered by the host to one tagged node (or the page)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered a node
    Enter(NodeId),
    /// Pointer left a node
    Leave(NodeId),
    /// Node was clicked
    Click(NodeId),
    /// Pointer moved, in host coordinates
    Move(Point),
}

/// Input routed through [`EditorSession::handle`]
#[derive(Debug, Clone, PartialEq)]
pub enum EditorInput {
    /// Pointer activity on the page
    Pointer(PointerEvent),
    /// Edit-mode toggle control activated
    ToggleEditMode,
    /// Host finished a render; tagged nodes may have changed
    Rendered,
    /// Sidebar drag gesture started
    DragStart,
    /// Sidebar drag gesture dropped a row
    DragEnd {
        /// Row index the gesture started on
        old_index: usize,
        /// Row index it was dropped on
        new_index: usize,
    },
    /// Sidebar drag gesture abandoned
    DragCancel,
    /// Pointer over a sidebar row (`None` when it left the list)
    SidebarHover(Option<TreePath>),
    /// Edit action on a sidebar row
    SidebarEdit(TreePath),
    /// Sidebar switched between content and layout editing
    SetSidebarMode(SidebarMode),
}

/// Editor state for one page
pub struct EditorSession<S: RegionStore, B: Broadcast = broadcast::Sender<EditorEvent>> {
    resolver: EditabilityResolver,
    store: S,
    tree: TreeSnapshot,
    edit_mode: EditModeController<B>,
    overlay: HighlightOverlay,
    sidebar: SiblingReorderController,
    surface: Rc<dyn Surface>,
}

impl<S: RegionStore, B: Broadcast> EditorSession<S, B> {
    /// Creates a session in viewing mode.
    ///
    /// Shell implementations are located in `registry` once here, using the
    /// patterns from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if a shell pattern is invalid or the stored
    /// configuration does not form a valid tree.
    pub fn new(
        store: S,
        registry: RegionRegistry,
        settings: &EditorSettings,
        surface: Rc<dyn Surface>,
        broadcast: B,
    ) -> Result<Self, TesseraError> {
        let shells = ShellNames::discover(&registry, &settings.shell_patterns)?;
        let resolver = EditabilityResolver::new(Arc::new(registry), shells);
        let tree = store.snapshot()?;
        let sidebar = SiblingReorderController::new(normalize_entries(&tree, &resolver));

        tracing::debug!(regions = tree.len(), "Editor session created");

        Ok(Self {
            resolver,
            store,
            tree,
            edit_mode: EditModeController::new(broadcast),
            overlay: HighlightOverlay::new(settings.hover_grace()),
            sidebar,
            surface,
        })
    }

    /// Current tree snapshot
    #[must_use]
    pub fn tree(&self) -> TreeSnapshot {
        Arc::clone(&self.tree)
    }

    /// Current tree with shells injected, as the renderer consumes it
    #[must_use]
    pub fn resolved_tree(&self) -> ResolvedTree {
        self.resolver.resolve_tree(&self.tree)
    }

    /// Whether the edit-mode toggle should be shown
    #[must_use]
    pub fn offers_edit_toggle(&self) -> bool {
        should_offer_edit_toggle(self.resolver.registry(), self.resolver.shells())
    }

    /// Edit-mode controller (read access)
    #[must_use]
    pub const fn edit_mode(&self) -> &EditModeController<B> {
        &self.edit_mode
    }

    /// Highlight overlay (read access)
    #[must_use]
    pub const fn overlay(&self) -> &HighlightOverlay {
        &self.overlay
    }

    /// Sidebar controller (read access)
    #[must_use]
    pub const fn sidebar(&self) -> &SiblingReorderController {
        &self.sidebar
    }

    /// Region store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Editability resolver
    #[must_use]
    pub const fn resolver(&self) -> &EditabilityResolver {
        &self.resolver
    }

    /// What the overlay should draw right now
    #[must_use]
    pub fn highlight(&self) -> Highlight {
        self.overlay
            .highlight(&*self.surface, self.edit_mode.targeted_path())
    }

    /// Deadline of the pending hover-removal timer
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.overlay.next_deadline()
    }

    /// Fires the hover-removal timer if it is due
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        self.overlay.poll_timers(now)
    }

    /// Switches edit mode and rebinds overlay listeners to match
    pub fn toggle_edit_mode(&mut self) -> bool {
        let _span = crate::trace_operation!(span_names::EDIT_MODE_TOGGLE).entered();
        let editing = self.edit_mode.toggle_edit_mode();
        self.overlay.sync_listeners(editing, &self.surface);
        editing
    }

    /// Targets a region from a sidebar row and drops any preview highlight
    pub fn edit_entry(&mut self, path: TreePath) {
        self.edit_mode.set_targeted_path(Some(path));
        self.overlay.preview(None);
    }

    /// Routes one input.
    ///
    /// Pointer inputs return how the host should propagate the event.
    /// Expected reorder rejections are absorbed here; the sidebar simply
    /// keeps its rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects a reorder or the tree cannot be
    /// rebuilt afterwards.
    pub fn handle(&mut self, input: EditorInput, now: Instant) -> Result<EventResponse, TesseraError> {
        match input {
            EditorInput::Pointer(event) => return Ok(self.handle_pointer(event, now)),
            EditorInput::ToggleEditMode => {
                self.toggle_edit_mode();
            }
            EditorInput::Rendered => {
                self.overlay.sync_listeners(self.edit_mode.edit_mode(), &self.surface);
            }
            EditorInput::DragStart => match self.sidebar.begin_gesture() {
                Ok(()) => self.overlay.set_suppressed(true),
                Err(err) => tracing::debug!(%err, "Drag ignored"),
            },
            EditorInput::DragEnd { old_index, new_index } => {
                let result = self.sidebar.end_gesture(&mut self.store, old_index, new_index);
                self.overlay.set_suppressed(false);
                self.after_reorder(result)?;
            }
            EditorInput::DragCancel => {
                self.sidebar.cancel_gesture();
                self.overlay.set_suppressed(false);
            }
            EditorInput::SidebarHover(path) => {
                if self.edit_mode.edit_mode() && !self.sidebar.is_sorting() {
                    self.overlay.preview(path);
                }
            }
            EditorInput::SidebarEdit(path) => self.edit_entry(path),
            EditorInput::SetSidebarMode(mode) => {
                self.sidebar.set_mode(mode);
                self.overlay.set_suppressed(self.sidebar.is_sorting());
            }
        }
        Ok(EventResponse::PROPAGATE)
    }

    fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> EventResponse {
        match event {
            PointerEvent::Enter(node) => self.overlay.on_hover_enter(node, &*self.surface),
            PointerEvent::Leave(node) => {
                self.overlay.on_hover_leave(node, now);
                EventResponse::PROPAGATE
            }
            PointerEvent::Click(node) => {
                let outcome = self.overlay.on_click(node);
                if let Some(path) = outcome.commit {
                    let _span = crate::trace_operation_debug!(span_names::OVERLAY_COMMIT, path = ?path).entered();
                    self.edit_mode.set_targeted_path(path);
                }
                outcome.response
            }
            PointerEvent::Move(position) => {
                self.overlay.on_pointer_move(position, &*self.surface);
                EventResponse::PROPAGATE
            }
        }
    }

    /// Moves `from` onto `to` outside of a drag gesture
    ///
    /// # Errors
    ///
    /// Same as [`EditorSession::handle`]; quiet rejections are returned too,
    /// so callers can report them.
    pub fn reorder(&mut self, from: &TreePath, to: &TreePath) -> Result<Vec<String>, TesseraError> {
        let order = self.sidebar.reorder(&mut self.store, from, to)?;
        self.rebuild()?;
        Ok(order)
    }

    fn after_reorder(&mut self, result: Result<Vec<String>, ReorderError>) -> Result<(), TesseraError> {
        match result {
            Ok(_) => self.rebuild(),
            Err(err) if err.is_quiet() => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the tree snapshot from the store and refreshes the sidebar
    fn rebuild(&mut self) -> Result<(), TesseraError> {
        let _span = crate::trace_operation_debug!(span_names::TREE_BUILD).entered();
        self.tree = self.store.snapshot()?;
        let entries = normalize_entries(&self.tree, &self.resolver);
        self.sidebar.refresh(entries);
        tracing::debug!(regions = self.tree.len(), "Region tree rebuilt");
        Ok(())
    }
}

impl<S: RegionStore, B: Broadcast> std::fmt::Debug for EditorSession<S, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("edit_mode", &self.edit_mode)
            .field("overlay", &self.overlay)
            .field("sidebar", &self.sidebar)
            .field("regions", &self.tree.len())
            .finish_non_exhaustive()
    }
}

/// Drives `session` until `inputs` is closed.
///
/// Runs on the current task: inputs are handled in arrival order and the
/// hover-removal timer is fired between them, so no state is shared across
/// threads. Input errors are logged and do not stop the loop. Time is read
/// from tokio's clock so the loop follows paused time in tests.
pub async fn run_event_loop<S: RegionStore, B: Broadcast>(
    session: &mut EditorSession<S, B>,
    inputs: mpsc::UnboundedReceiver<EditorInput>,
) {
    run_event_loop_with(session, inputs, |_| {}).await;
}

/// Like [`run_event_loop`], calling `after_input` once each input has been
/// handled.
///
/// Hosts use the hook to re-render when the tree snapshot changed and to
/// report [`EditorInput::Rendered`] back before the next input is read.
pub async fn run_event_loop_with<S, B, F>(
    session: &mut EditorSession<S, B>,
    mut inputs: mpsc::UnboundedReceiver<EditorInput>,
    mut after_input: F,
) where
    S: RegionStore,
    B: Broadcast,
    F: FnMut(&mut EditorSession<S, B>),
{
    tracing::debug!("Event loop started");

    loop {
        let deadline = session.next_deadline();
        let timer = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            input = inputs.recv() => {
                let Some(input) = input else { break };
                let now = tokio::time::Instant::now().into_std();
                if let Err(err) = session.handle(input, now) {
                    tracing::warn!(%err, "Editor input failed");
                }
                after_input(session);
            }
            () = timer => {
                session.poll_timers(tokio::time::Instant::now().into_std());
            }
        }
    }

    tracing::debug!("Input channel closed, event loop finished");
}
