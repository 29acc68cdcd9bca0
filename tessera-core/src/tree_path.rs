//! Hierarchical region addressing
//!
//! A [`TreePath`] is a `/`-delimited list of region names. The last segment is
//! the region's own name and everything before it is the address of its
//! parent. Paths are immutable values: deriving a parent, child or sibling
//! always produces a new path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathError;

/// Segment separator
pub const SEPARATOR: char = '/';

/// Address of one region in the page tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreePath(String);

impl TreePath {
    /// Parses and validates a tree path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] for an empty string and
    /// [`PathError::EmptySegment`] when any segment is empty.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(index) = raw.split(SEPARATOR).position(str::is_empty) {
            return Err(PathError::EmptySegment {
                path: raw.to_string(),
                index,
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the path as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent path, or `None` for a root path
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind(SEPARATOR)
            .map(|idx| Self(self.0[..idx].to_string()))
    }

    /// Returns the last segment
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        self.0
            .rfind(SEPARATOR)
            .map_or(self.0.as_str(), |idx| &self.0[idx + 1..])
    }

    /// Composes the path of a direct child.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidSegment`] if `name` is empty or contains
    /// a separator.
    pub fn join(&self, name: &str) -> Result<Self, PathError> {
        check_segment(name)?;
        Ok(Self(format!("{}{SEPARATOR}{name}", self.0)))
    }

    /// Composes the path of a sibling with the given name.
    ///
    /// For a root path the sibling is another root path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidSegment`] if `name` is not a single
    /// non-empty segment.
    pub fn sibling(&self, name: &str) -> Result<Self, PathError> {
        match self.parent() {
            Some(parent) => parent.join(name),
            None => {
                check_segment(name)?;
                Ok(Self(name.to_string()))
            }
        }
    }

    /// Number of segments minus one (root paths have depth 0)
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.matches(SEPARATOR).count()
    }

    /// Iterates over the segments from root to leaf
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// Returns true if `self` is a strict ancestor of `other`
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0[self.0.len()..].starts_with(SEPARATOR)
    }
}

fn check_segment(name: &str) -> Result<(), PathError> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(PathError::InvalidSegment { name: name.to_string() });
    }
    Ok(())
}

/// Returns the parent of `path`, or `None` for a root path
#[must_use]
pub fn parent(path: &TreePath) -> Option<TreePath> {
    path.parent()
}

/// Returns the last segment of `path`
#[must_use]
pub fn leaf_name(path: &TreePath) -> &str {
    path.leaf_name()
}

/// Returns true if both paths have the same parent (both roots count as equal)
#[must_use]
pub fn equal_parents(a: &TreePath, b: &TreePath) -> bool {
    a.parent() == b.parent()
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TreePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TreePath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl AsRef<str> for TreePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for TreePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TreePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
