//! Replay a scripted editor session.
//!
//! Scripts have one step per line; `#` starts a comment. Pointer steps name
//! the region whose node receives the event; the node is looked up when the
//! step runs, so steps after a reorder address the re-rendered page.
//!
//! ```text
//! toggle                 # edit-mode toggle control
//! render                 # host finished a render
//! move X Y               # pointer moved (host coordinates)
//! enter PATH | leave PATH | click PATH
//! wait MS                # let time pass
//! drag-start | drag-end OLD NEW | drag-cancel
//! hover-row PATH | hover-row -
//! edit-row PATH
//! mode layout | mode content
//! ```

use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tessera_core::testing::FakeSurface;
use tessera_core::trace_operation;
use tessera_core::tracing::span_names;
use tessera_core::{
    EditorInput, EditorSession, EditorSettings, Highlight, InMemoryRegionStore, NodeId, NoopBroadcast,
    Point, PointerEvent, RegionStore, SidebarMode, Surface, TreePath, run_event_loop_with,
};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{layout_surface, open_page, print_json, registry_for};

type ReplaySession = EditorSession<InMemoryRegionStore, NoopBroadcast>;

/// Pointer event kinds addressed to a region's node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerKind {
    Enter,
    Leave,
    Click,
}

impl PointerKind {
    const fn event(self, node: NodeId) -> PointerEvent {
        match self {
            Self::Enter => PointerEvent::Enter(node),
            Self::Leave => PointerEvent::Leave(node),
            Self::Click => PointerEvent::Click(node),
        }
    }
}

/// One parsed script line
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Send(EditorInput),
    Pointer(PointerKind, TreePath),
    Wait(Duration),
}

/// Replay command handler
pub fn cmd_replay(
    settings: &EditorSettings,
    page: &Path,
    script: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    let document = open_page(page)?;
    let steps = parse_script(&std::fs::read_to_string(script)?)?;
    let registry = registry_for(&document);
    let surface = layout_surface(&document)?;
    let span = trace_operation!(span_names::SESSION_RUN, steps = steps.len(), script = %script.display());

    let mut session = EditorSession::new(
        InMemoryRegionStore::new(document),
        registry,
        settings,
        Rc::clone(&surface) as Rc<dyn Surface>,
        NoopBroadcast,
    )?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Output(format!("Failed to create runtime: {e}")))?;
    runtime.block_on(
        async {
            let (tx, rx) = mpsc::unbounded_channel();
            let (ack_tx, ack_rx) = mpsc::unbounded_channel();
            let host = rerender_on_change(Rc::clone(&surface), session.tree(), ack_tx);
            let feed = feed_steps(steps, &surface, tx, ack_rx);
            let ((), fed) = tokio::join!(run_event_loop_with(&mut session, rx, host), feed);
            fed
        }
        .instrument(span),
    )?;

    print_summary(&session, format)
}

/// Host side of the loop: re-lays out the page whenever the tree snapshot
/// was replaced, reports the render, then acknowledges the input.
fn rerender_on_change(
    surface: Rc<FakeSurface>,
    mut shown: tessera_core::TreeSnapshot,
    ack: mpsc::UnboundedSender<()>,
) -> impl FnMut(&mut ReplaySession) {
    move |session: &mut ReplaySession| {
        let tree = session.tree();
        if !Arc::ptr_eq(&tree, &shown) {
            surface.relayout(&tree);
            shown = tree;
            if let Err(err) = session.handle(EditorInput::Rendered, tokio::time::Instant::now().into_std()) {
                tracing::warn!(%err, "Re-render failed");
            }
            tracing::debug!(regions = shown.len(), "Page re-rendered");
        }
        let _ = ack.send(());
    }
}

/// Sends steps one at a time, waiting until each input has been handled so
/// pointer steps resolve against the current layout.
async fn feed_steps(
    steps: Vec<(usize, Step)>,
    surface: &FakeSurface,
    inputs: mpsc::UnboundedSender<EditorInput>,
    mut handled: mpsc::UnboundedReceiver<()>,
) -> Result<(), CliError> {
    for (line, step) in steps {
        let input = match step {
            Step::Wait(duration) => {
                tokio::time::sleep(duration).await;
                continue;
            }
            Step::Send(input) => input,
            Step::Pointer(kind, path) => {
                let node = surface.find_node(&path).ok_or_else(|| CliError::Script {
                    line,
                    reason: format!("region '{path}' is not rendered"),
                })?;
                EditorInput::Pointer(kind.event(node))
            }
        };
        if inputs.send(input).is_err() || handled.recv().await.is_none() {
            break;
        }
    }
    Ok(())
}

fn parse_script(text: &str) -> Result<Vec<(usize, Step)>, CliError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_step(line).map_err(|reason| CliError::Script { line: idx + 1, reason })?;
        steps.push((idx + 1, step));
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (command, args) = words.split_first().ok_or_else(|| "empty step".to_string())?;

    match (*command, args) {
        ("toggle", []) => Ok(Step::Send(EditorInput::ToggleEditMode)),
        ("render", []) => Ok(Step::Send(EditorInput::Rendered)),
        ("move", [x, y]) => Ok(Step::Send(EditorInput::Pointer(PointerEvent::Move(Point::new(
            number(x)?,
            number(y)?,
        ))))),
        ("enter", [path]) => pointer_step(PointerKind::Enter, path),
        ("leave", [path]) => pointer_step(PointerKind::Leave, path),
        ("click", [path]) => pointer_step(PointerKind::Click, path),
        ("wait", [ms]) => ms
            .parse::<u64>()
            .map(|ms| Step::Wait(Duration::from_millis(ms)))
            .map_err(|_| format!("invalid duration '{ms}'")),
        ("drag-start", []) => Ok(Step::Send(EditorInput::DragStart)),
        ("drag-end", [old, new]) => Ok(Step::Send(EditorInput::DragEnd {
            old_index: index(old)?,
            new_index: index(new)?,
        })),
        ("drag-cancel", []) => Ok(Step::Send(EditorInput::DragCancel)),
        ("hover-row", ["-"]) => Ok(Step::Send(EditorInput::SidebarHover(None))),
        ("hover-row", [path]) => Ok(Step::Send(EditorInput::SidebarHover(Some(region_path(path)?)))),
        ("edit-row", [path]) => Ok(Step::Send(EditorInput::SidebarEdit(region_path(path)?))),
        ("mode", ["layout"]) => Ok(Step::Send(EditorInput::SetSidebarMode(SidebarMode::Layout))),
        ("mode", ["content"]) => Ok(Step::Send(EditorInput::SetSidebarMode(SidebarMode::Content))),
        (
            "toggle" | "render" | "move" | "enter" | "leave" | "click" | "wait" | "drag-start"
            | "drag-end" | "drag-cancel" | "hover-row" | "edit-row" | "mode",
            _,
        ) => Err(format!("wrong arguments for '{command}'")),
        _ => Err(format!("unknown step '{command}'")),
    }
}

fn pointer_step(kind: PointerKind, raw: &str) -> Result<Step, String> {
    Ok(Step::Pointer(kind, region_path(raw)?))
}

fn region_path(raw: &str) -> Result<TreePath, String> {
    TreePath::parse(raw).map_err(|e| e.to_string())
}

fn number(raw: &str) -> Result<f64, String> {
    raw.parse().map_err(|_| format!("invalid coordinate '{raw}'"))
}

fn index(raw: &str) -> Result<usize, String> {
    raw.parse().map_err(|_| format!("invalid row index '{raw}'"))
}

fn print_summary<S: RegionStore>(
    session: &EditorSession<S, NoopBroadcast>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let targeted = session.edit_mode().targeted_path().map(ToString::to_string);
    let hovered = session.overlay().hovered_path().map(ToString::to_string);
    let highlight = session.highlight();
    let kind = match highlight {
        Highlight::Region(_) => "region",
        Highlight::Idle(_) => "idle",
        Highlight::Hidden => "hidden",
    };
    let mode = match session.sidebar().mode() {
        SidebarMode::Layout => "layout",
        SidebarMode::Content => "content",
    };
    let rows: Vec<String> = session
        .sidebar()
        .entries()
        .iter()
        .map(|entry| entry.path.to_string())
        .collect();

    match format {
        OutputFormat::Table => {
            println!("Edit mode:  {}", if session.edit_mode().edit_mode() { "on" } else { "off" });
            println!("Targeted:   {}", targeted.as_deref().unwrap_or("-"));
            println!("Hovered:    {}", hovered.as_deref().unwrap_or("-"));
            match highlight.rect() {
                Some(r) => println!("Highlight:  {kind} at ({}, {}) {}x{}", r.x, r.y, r.width, r.height),
                None => println!("Highlight:  {kind}"),
            }
            println!("Sidebar:    {mode}");
            for row in &rows {
                println!("  {row}");
            }
        }
        OutputFormat::Json => print_json(&json!({
            "edit_mode": session.edit_mode().edit_mode(),
            "targeted": targeted,
            "hovered": hovered,
            "highlight": {
                "kind": kind,
                "rect": highlight.rect().map(|r| json!({
                    "x": r.x, "y": r.y, "width": r.width, "height": r.height,
                })),
            },
            "sidebar_mode": mode,
            "rows": rows,
        }))?,
    }
    Ok(())
}
