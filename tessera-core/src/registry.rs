//! Implementation registry
//!
//! Maps a logical implementation name to its descriptor. A descriptor that
//! declares a configuration schema makes every region using it editable.
//!
//! The editor's own shell implementations (the wrapper that makes a region
//! targetable and the placeholder rendered for empty regions) are deployed
//! under versioned names. [`ShellNames::discover`] matches them against
//! [`ShellPatterns`] once, when the tree is built, and keeps the resolved
//! names afterwards.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};

/// Fallback name of the editable-region shell
pub const DEFAULT_EDITABLE_SHELL: &str = "tessera.editor/EditableRegion";

/// Fallback name of the empty-region shell
pub const DEFAULT_EMPTY_SHELL: &str = "tessera.editor/EmptyRegion";

/// Registry entry for one implementation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationDescriptor {
    /// Configuration schema; presence makes regions using this implementation editable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ImplementationDescriptor {
    /// Descriptor with a schema
    #[must_use]
    pub fn with_schema(schema: Value) -> Self {
        Self {
            schema: Some(schema),
            title: None,
        }
    }

    /// Returns true if the implementation declares a schema
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.schema.is_some()
    }
}

/// Typed `name -> descriptor` registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionRegistry {
    implementations: BTreeMap<String, ImplementationDescriptor>,
}

impl RegionRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, descriptor: ImplementationDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Registers or replaces an implementation
    pub fn insert(&mut self, name: impl Into<String>, descriptor: ImplementationDescriptor) {
        self.implementations.insert(name.into(), descriptor);
    }

    /// Looks up an implementation; unknown names yield `None`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ImplementationDescriptor> {
        self.implementations.get(name)
    }

    /// Returns the declared schema of `name`, if any
    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(|d| d.schema.as_ref())
    }

    /// All registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.implementations.keys().map(String::as_str)
    }

    /// All entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ImplementationDescriptor)> {
        self.implementations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered implementations
    #[must_use]
    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    /// Returns true if nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}

impl From<BTreeMap<String, ImplementationDescriptor>> for RegionRegistry {
    fn from(implementations: BTreeMap<String, ImplementationDescriptor>) -> Self {
        Self { implementations }
    }
}

/// Naming patterns used to locate the editor's shell implementations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellPatterns {
    /// Pattern for the editable-region shell
    pub editable: String,
    /// Pattern for the empty-region shell
    pub empty: String,
}

impl Default for ShellPatterns {
    fn default() -> Self {
        Self {
            editable: r"(^|/)EditableRegion$".to_string(),
            empty: r"(^|/)EmptyRegion$".to_string(),
        }
    }
}

/// Resolved shell implementation names
#[derive(Debug, Clone)]
pub struct ShellNames {
    /// Name of the editable-region shell
    pub editable: String,
    /// Name of the empty-region shell
    pub empty: String,
    empty_marker: Option<Regex>,
}

impl ShellNames {
    /// Resolves shell names by matching registry keys against `patterns`.
    ///
    /// The first matching name in sorted order wins. When nothing matches the
    /// fallback name is used so that wrapping still produces a stable marker.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a pattern is not a valid regex.
    pub fn discover(registry: &RegionRegistry, patterns: &ShellPatterns) -> ConfigResult<Self> {
        let editable_re = compile("shell_patterns.editable", &patterns.editable)?;
        let empty_re = compile("shell_patterns.empty", &patterns.empty)?;

        let editable = find_match(registry, &editable_re, DEFAULT_EDITABLE_SHELL);
        let empty = find_match(registry, &empty_re, DEFAULT_EMPTY_SHELL);

        tracing::debug!(editable = %editable, empty = %empty, "Shell implementations resolved");

        Ok(Self {
            editable,
            empty,
            empty_marker: Some(empty_re),
        })
    }

    /// Returns true if `name` is an empty-region shell implementation
    #[must_use]
    pub fn is_empty_marker(&self, name: &str) -> bool {
        name == self.empty
            || self
                .empty_marker
                .as_ref()
                .is_some_and(|re| re.is_match(name))
    }
}

impl Default for ShellNames {
    fn default() -> Self {
        Self {
            editable: DEFAULT_EDITABLE_SHELL.to_string(),
            empty: DEFAULT_EMPTY_SHELL.to_string(),
            empty_marker: None,
        }
    }
}

fn compile(field: &str, pattern: &str) -> ConfigResult<Regex> {
    Regex::new(pattern).map_err(|e| ConfigError::Validation {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

fn find_match(registry: &RegionRegistry, re: &Regex, fallback: &str) -> String {
    registry.names().find(|n| re.is_match(n)).map_or_else(
        || {
            tracing::warn!(pattern = %re, fallback, "No shell implementation matched, using fallback");
            fallback.to_string()
        },
        str::to_string,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> RegionRegistry {
        RegionRegistry::new()
            .with("pages.editor@2.1.0/EditableRegion", ImplementationDescriptor::default())
            .with("pages.editor@2.1.0/EmptyRegion", ImplementationDescriptor::default())
            .with("store@1.0.0/Shelf", ImplementationDescriptor::with_schema(json!({"type": "object"})))
            .with("store@1.0.0/Footer", ImplementationDescriptor::default())
    }

    #[test]
    fn lookup_and_schema() {
        let reg = registry();
        assert!(reg.get("store@1.0.0/Shelf").unwrap().is_editable());
        assert!(reg.schema("store@1.0.0/Footer").is_none());
        assert!(reg.get("unknown").is_none());
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn discovers_versioned_shells() {
        let shells = ShellNames::discover(&registry(), &ShellPatterns::default()).unwrap();
        assert_eq!(shells.editable, "pages.editor@2.1.0/EditableRegion");
        assert_eq!(shells.empty, "pages.editor@2.1.0/EmptyRegion");
        assert!(shells.is_empty_marker("pages.editor@3.0.0/EmptyRegion"));
        assert!(!shells.is_empty_marker("store@1.0.0/Shelf"));
    }

    #[test]
    fn falls_back_when_no_shell_registered() {
        let shells = ShellNames::discover(&RegionRegistry::new(), &ShellPatterns::default()).unwrap();
        assert_eq!(shells.editable, DEFAULT_EDITABLE_SHELL);
        assert_eq!(shells.empty, DEFAULT_EMPTY_SHELL);
    }

    #[test]
    fn invalid_pattern_is_validation_error() {
        let patterns = ShellPatterns {
            editable: "(".to_string(),
            ..ShellPatterns::default()
        };
        let err = ShellNames::discover(&registry(), &patterns).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "shell_patterns.editable"));
    }

    #[test]
    fn default_shell_names_match_fallbacks() {
        let shells = ShellNames::default();
        assert!(shells.is_empty_marker(DEFAULT_EMPTY_SHELL));
        assert!(!shells.is_empty_marker(DEFAULT_EDITABLE_SHELL));
    }
}
