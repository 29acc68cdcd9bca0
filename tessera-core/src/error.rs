//! Error types for Tessera core
//!
//! Each concern owns a focused `thiserror` enum; [`TesseraError`] unifies them
//! for callers (such as the CLI) that only need to report a failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::sidebar::ReorderError;

/// Malformed tree-path input.
///
/// Always a programming error at the call site, so it is propagated rather
/// than recovered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string was empty
    #[error("invalid tree path: path is empty")]
    Empty,

    /// The path contained an empty segment (leading, trailing or doubled `/`)
    #[error("invalid tree path `{path}`: empty segment at position {index}")]
    EmptySegment {
        /// The offending input
        path: String,
        /// Zero-based index of the empty segment
        index: usize,
    },

    /// A single region name was empty or contained the separator
    #[error("invalid region name `{name}`: must be one non-empty segment")]
    InvalidSegment {
        /// The offending name
        name: String,
    },
}

/// Errors reported by a region-configuration store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No configuration exists for the requested path
    #[error("no region configuration for `{0}`")]
    NotFound(String),

    /// The store refused the write
    #[error("write to `{path}` rejected: {reason}")]
    WriteRejected {
        /// Path that was being written
        path: String,
        /// Reason given by the store
        reason: String,
    },
}

/// Errors that can occur while loading or saving configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a file failed
    #[error("failed to access {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// File that was being parsed
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Serialization of a document failed
    #[error("failed to serialize configuration: {0}")]
    Serialize(String),

    /// A configured value is invalid
    #[error("invalid value for {field}: {reason}")]
    Validation {
        /// Field name
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// The file extension does not map to a known document format
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Umbrella error for Tessera core operations
#[derive(Debug, Error)]
pub enum TesseraError {
    /// Tree path error
    #[error(transparent)]
    Path(#[from] PathError),

    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reorder rejection
    #[error(transparent)]
    Reorder(#[from] ReorderError),
}
