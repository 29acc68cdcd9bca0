//! Property-based tests for schema-driven editability

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;
use tessera_core::{
    EditabilityResolver, EditableRegion, ImplementationDescriptor, Props, Region, RegionRegistry,
    ShellNames, ShellPatterns, TreePath, list_editable_region_names, should_offer_edit_toggle,
};

/// Strategy for a registry of up to 6 implementations, some with a schema
fn registry_strategy() -> impl Strategy<Value = RegionRegistry> {
    prop::collection::btree_map("[A-Z][a-z]{1,6}", any::<bool>(), 0..6).prop_map(|entries| {
        let mut registry = RegionRegistry::new();
        for (name, has_schema) in entries {
            let descriptor = if has_schema {
                ImplementationDescriptor::with_schema(json!({"type": "object"}))
            } else {
                ImplementationDescriptor::default()
            };
            registry.insert(name, descriptor);
        }
        registry
    })
}

fn props_strategy() -> impl Strategy<Value = Props> {
    prop::collection::btree_map("[a-z]{1,5}", "[a-z ]{0,8}", 0..4).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect()
    })
}

fn region(component: Option<String>, props: Props) -> Region {
    Region {
        path: TreePath::parse("page/slot").unwrap(),
        component,
        props,
        children: Vec::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// **Feature: editability, Property 1: Schema Decides**
    ///
    /// A region is wrapped exactly when its implementation has a schema or it
    /// has no implementation; wrapping a schema region keeps its props.
    #[test]
    fn prop_schema_decides_editability(
        registry in registry_strategy(),
        pick in any::<prop::sample::Index>(),
        unknown in any::<bool>(),
        props in props_strategy(),
    ) {
        let names: Vec<String> = registry.names().map(str::to_string).collect();
        let component = if unknown || names.is_empty() {
            "unknown/Widget".to_string()
        } else {
            names[pick.index(names.len())].clone()
        };
        let has_schema = registry.schema(&component).is_some();
        let resolver = EditabilityResolver::new(Arc::new(registry), ShellNames::default());

        let resolved = resolver.resolve(&region(Some(component.clone()), props.clone()));
        prop_assert_eq!(resolved.is_editable(), has_schema);
        prop_assert_eq!(&resolved.region().props, &props);
        if has_schema {
            prop_assert_eq!(
                resolved.components(),
                vec![component, resolver.shells().editable.clone()]
            );
        } else {
            prop_assert!(matches!(resolved, EditableRegion::Unchanged(_)));
        }
    }

    /// **Feature: editability, Property 2: Empty Regions**
    ///
    /// Regions without implementation are wrapped with both shells and lose
    /// their props.
    #[test]
    fn prop_empty_region_wrapped(registry in registry_strategy(), props in props_strategy()) {
        let resolver = EditabilityResolver::new(Arc::new(registry), ShellNames::default());
        let resolved = resolver.resolve(&region(None, props));
        prop_assert!(resolved.is_editable());
        prop_assert!(resolved.is_empty_placeholder());
        prop_assert!(resolved.region().props.is_empty());
    }

    /// **Feature: editability, Property 3: Editable Name Listing**
    ///
    /// Listed names are exactly the registry entries with a schema that are
    /// not empty-region shells; the toggle is offered iff the list is
    /// non-empty.
    #[test]
    fn prop_editable_names(mut registry in registry_strategy()) {
        registry.insert(
            "tessera.editor/EmptyRegion",
            ImplementationDescriptor::with_schema(json!({})),
        );
        let shells = ShellNames::discover(&registry, &ShellPatterns::default()).unwrap();
        let names = list_editable_region_names(&registry, &shells);

        prop_assert!(!names.contains("tessera.editor/EmptyRegion"));
        for (name, descriptor) in registry.iter() {
            if name != "tessera.editor/EmptyRegion" {
                prop_assert_eq!(names.contains(name), descriptor.schema.is_some());
            }
        }
        prop_assert_eq!(should_offer_edit_toggle(&registry, &shells), !names.is_empty());
    }
}
