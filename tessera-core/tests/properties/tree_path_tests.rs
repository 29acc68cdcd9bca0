//! Property-based tests for tree-path addressing

use proptest::prelude::*;
use tessera_core::{TreePath, equal_parents, leaf_name, parent};

/// Strategy for a single valid path segment
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,7}"
}

/// Strategy for valid paths with 1 to 5 segments
fn path_strategy() -> impl Strategy<Value = TreePath> {
    prop::collection::vec(segment_strategy(), 1..=5)
        .prop_map(|segments| TreePath::parse(&segments.join("/")).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Feature: tree-path, Property 1: Parse/Display Round Trip**
    ///
    /// Displaying a path and parsing it again yields the same path.
    #[test]
    fn prop_display_parse_round_trip(path in path_strategy()) {
        let reparsed = TreePath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(reparsed, path);
    }

    /// **Feature: tree-path, Property 2: Join Inverts Parent**
    ///
    /// Joining a segment and taking the parent gives back the original path,
    /// and the leaf name is the joined segment.
    #[test]
    fn prop_join_then_parent(path in path_strategy(), name in segment_strategy()) {
        let child = path.join(&name).unwrap();
        prop_assert_eq!(parent(&child), Some(path.clone()));
        prop_assert_eq!(leaf_name(&child), name.as_str());
        prop_assert_eq!(child.depth(), path.depth() + 1);
        prop_assert!(path.is_ancestor_of(&child));
    }

    /// **Feature: tree-path, Property 3: Sibling Relation**
    ///
    /// `equal_parents` is reflexive and symmetric, and holds for any two
    /// children of the same path.
    #[test]
    fn prop_equal_parents_relation(
        a in path_strategy(),
        b in path_strategy(),
        x in segment_strategy(),
        y in segment_strategy(),
    ) {
        prop_assert!(equal_parents(&a, &a));
        prop_assert_eq!(equal_parents(&a, &b), equal_parents(&b, &a));
        prop_assert!(equal_parents(&a.join(&x).unwrap(), &a.join(&y).unwrap()));
    }

    /// **Feature: tree-path, Property 4: Empty Segments Rejected**
    ///
    /// Any path with a doubled, leading or trailing separator fails to parse.
    #[test]
    fn prop_empty_segment_rejected(path in path_strategy(), pos in 0usize..3) {
        let raw = path.to_string();
        let broken = match pos {
            0 => format!("/{raw}"),
            1 => format!("{raw}/"),
            _ => format!("{raw}//x"),
        };
        prop_assert!(TreePath::parse(&broken).is_err());
    }
}
