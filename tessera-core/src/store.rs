//! Region-configuration store
//!
//! The store is the single shared resource holding region configuration. Its
//! only writers are user-initiated operations; after a write the caller
//! rebuilds the region tree from the store's document.

use crate::error::{PathError, StoreError};
use crate::region::{PageDocument, RegionConfig, RegionTree, TreeSnapshot};
use crate::tree_path::TreePath;

/// Read/write access to region configuration
pub trait RegionStore {
    /// Reads the configuration stored for `path`
    fn read(&self, path: &TreePath) -> Option<RegionConfig>;

    /// Replaces the configuration stored for `path`
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store refuses the write.
    fn write(&mut self, path: &TreePath, config: RegionConfig) -> Result<(), StoreError>;

    /// Builds a fresh tree snapshot from the current configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the stored configuration contains an invalid
    /// child name.
    fn snapshot(&self) -> Result<TreeSnapshot, PathError>;
}

/// Store backed by an in-memory [`PageDocument`]
#[derive(Debug, Clone)]
pub struct InMemoryRegionStore {
    document: PageDocument,
    read_only: bool,
    fail_next_write: Option<String>,
    writes: usize,
}

impl InMemoryRegionStore {
    /// Wraps a page document
    #[must_use]
    pub fn new(document: PageDocument) -> Self {
        Self {
            document,
            read_only: false,
            fail_next_write: None,
            writes: 0,
        }
    }

    /// The current document
    #[must_use]
    pub const fn document(&self) -> &PageDocument {
        &self.document
    }

    /// Consumes the store, returning its document
    #[must_use]
    pub fn into_document(self) -> PageDocument {
        self.document
    }

    /// Rejects every subsequent write
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Rejects only the next write with `reason`
    pub fn fail_next_write(&mut self, reason: impl Into<String>) {
        self.fail_next_write = Some(reason.into());
    }

    /// Number of successful writes
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl RegionStore for InMemoryRegionStore {
    fn read(&self, path: &TreePath) -> Option<RegionConfig> {
        self.document.regions.get(path).cloned()
    }

    fn write(&mut self, path: &TreePath, config: RegionConfig) -> Result<(), StoreError> {
        if let Some(reason) = self.fail_next_write.take() {
            return Err(StoreError::WriteRejected {
                path: path.to_string(),
                reason,
            });
        }
        if self.read_only {
            return Err(StoreError::WriteRejected {
                path: path.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.document.regions.insert(path.clone(), config);
        self.writes += 1;
        tracing::debug!(path = %path, "Region configuration written");
        Ok(())
    }

    fn snapshot(&self) -> Result<TreeSnapshot, PathError> {
        RegionTree::snapshot(&self.document)
    }
}
