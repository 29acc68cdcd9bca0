//! Property-based tests for sibling reordering

use std::collections::BTreeSet;

use proptest::prelude::*;
use tessera_core::{
    InMemoryRegionStore, PageDocument, RegionConfig, RegionStore, ReorderError,
    SiblingReorderController, SidebarEntry, TreePath, compute_sibling_order,
};

/// Strategy for 2 to 8 distinct child names
fn children_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,6}", 2..=8)
        .prop_map(|set: BTreeSet<String>| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Children plus two distinct indices into them
fn move_strategy() -> impl Strategy<Value = (Vec<String>, usize, usize)> {
    children_strategy().prop_flat_map(|children| {
        let len = children.len();
        (Just(children), 0..len, 0..len).prop_filter("distinct indices", |(_, a, b)| a != b)
    })
}

fn child(parent: &str, name: &str) -> TreePath {
    TreePath::parse(&format!("{parent}/{name}")).unwrap()
}

fn fixture(children: &[String]) -> (InMemoryRegionStore, SiblingReorderController) {
    let root = TreePath::parse("page").unwrap();
    let mut doc = PageDocument::new(root.clone());
    doc.regions.insert(
        root,
        RegionConfig::with_component("Page").with_children(children.to_vec()),
    );
    let rows = children
        .iter()
        .map(|name| SidebarEntry {
            path: child("page", name),
            title: name.clone(),
            component: None,
            editable: true,
        })
        .collect();
    (InMemoryRegionStore::new(doc), SiblingReorderController::new(rows))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Feature: sidebar-reorder, Property 1: Single-Element Move**
    ///
    /// The dragged child lands at the target's index; the others keep their
    /// relative order and no name is lost or duplicated.
    #[test]
    fn prop_single_element_move((children, from, to) in move_strategy()) {
        let order = compute_sibling_order(
            &child("page", &children[from]),
            &child("page", &children[to]),
            &children,
        ).unwrap();

        prop_assert_eq!(order.len(), children.len());
        prop_assert_eq!(&order[to], &children[from]);

        let rest_before: Vec<_> = children.iter().filter(|n| **n != children[from]).collect();
        let rest_after: Vec<_> = order.iter().filter(|n| **n != children[from]).collect();
        prop_assert_eq!(rest_before, rest_after);
    }

    /// **Feature: sidebar-reorder, Property 2: Cross-Parent Rejected**
    ///
    /// Paths under different parents are always rejected, quietly.
    #[test]
    fn prop_cross_parent_rejected(children in children_strategy()) {
        let err = compute_sibling_order(
            &child("page/a", &children[0]),
            &child("page/b", &children[1]),
            &children,
        ).unwrap_err();
        prop_assert!(
            matches!(err, ReorderError::CrossParentReorder { .. }),
            "unexpected error: {:?}",
            err
        );
        prop_assert!(err.is_quiet());
    }

    /// **Feature: sidebar-reorder, Property 3: Atomic Update**
    ///
    /// A rejected store write leaves both the stored order and the rendered
    /// rows exactly as before; an accepted one updates both identically.
    #[test]
    fn prop_store_and_rows_change_together(
        (children, from, to) in move_strategy(),
        fail in any::<bool>(),
    ) {
        let (mut store, mut controller) = fixture(&children);
        let rows_before = controller.entries().to_vec();
        if fail {
            store.fail_next_write("offline");
        }

        controller.begin_gesture().unwrap();
        let result = controller.end_gesture(&mut store, from, to);
        prop_assert!(!controller.is_sorting());

        let stored = store.read(&TreePath::parse("page").unwrap()).unwrap().children;
        let rows: Vec<String> = controller
            .entries()
            .iter()
            .map(|e| e.path.leaf_name().to_string())
            .collect();

        if fail {
            prop_assert!(matches!(result, Err(ReorderError::Store(_))));
            prop_assert_eq!(controller.entries(), rows_before.as_slice());
            prop_assert_eq!(stored, children);
        } else {
            prop_assert_eq!(result.unwrap(), stored.clone());
            prop_assert_eq!(rows, stored);
        }
    }
}
