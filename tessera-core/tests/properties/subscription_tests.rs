//! Property-based tests for overlay listener binding

use std::rc::Rc;

use proptest::prelude::*;
use tessera_core::overlay::{HighlightOverlay, Rect, Surface};
use tessera_core::testing::FakeSurface;
use tessera_core::TreePath;

#[derive(Debug, Clone)]
enum Op {
    Sync(bool),
    AddNode,
    RemoveNode(prop::sample::Index),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Sync),
        Just(Op::AddNode),
        any::<prop::sample::Index>().prop_map(Op::RemoveNode),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Feature: highlight-overlay, Property 4: Scoped Listeners**
    ///
    /// After syncing, every tagged node is bound while editing and none is
    /// bound otherwise. Dropping the overlay releases every binding.
    #[test]
    fn prop_listeners_follow_edit_mode(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let surface = Rc::new(FakeSurface::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let dyn_surface: Rc<dyn Surface> = surface.clone();
        let mut overlay = HighlightOverlay::default();
        let mut next = 0u32;

        for op in ops {
            match op {
                Op::Sync(editing) => {
                    overlay.sync_listeners(editing, &dyn_surface);
                    let mut bound = surface.bound_nodes();
                    bound.sort();
                    if editing {
                        let mut tagged = surface.tagged_nodes();
                        tagged.sort();
                        prop_assert_eq!(bound, tagged);
                    } else {
                        prop_assert!(bound.is_empty());
                    }
                }
                Op::AddNode => {
                    let path = TreePath::parse(&format!("page/n{next}")).unwrap();
                    next += 1;
                    surface.add_node(path, None, Rect::new(0.0, 0.0, 10.0, 10.0));
                }
                Op::RemoveNode(idx) => {
                    let nodes = surface.tagged_nodes();
                    if !nodes.is_empty() {
                        surface.remove_node(nodes[idx.index(nodes.len())]);
                    }
                }
            }
        }

        drop(overlay);
        prop_assert!(surface.bound_nodes().is_empty());
    }
}
