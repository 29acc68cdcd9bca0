//! CLI error types and exit codes.

use tessera_core::{ConfigError, ReorderError, TesseraError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - settings, page documents, scripts, or I/O
    pub const GENERAL_ERROR: i32 = 1;
    /// The requested reorder was rejected
    pub const REORDER_REJECTED: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Page document error
    #[error("Page error: {0}")]
    Page(String),

    /// Reorder rejected or failed
    #[error("Reorder rejected: {0}")]
    Reorder(String),

    /// Replay script error
    #[error("Script error at line {line}: {reason}")]
    Script {
        /// 1-based line number
        line: usize,
        /// What is wrong with the line
        reason: String,
    },

    /// Output serialization error
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ReorderError> for CliError {
    fn from(err: ReorderError) -> Self {
        Self::Reorder(err.to_string())
    }
}

impl From<TesseraError> for CliError {
    fn from(err: TesseraError) -> Self {
        match err {
            TesseraError::Config(e) => e.into(),
            TesseraError::Reorder(e) => e.into(),
            TesseraError::Path(e) => Self::Page(e.to_string()),
            TesseraError::Store(e) => Self::Reorder(e.to_string()),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (settings, page, script, output, IO)
    /// - 2: Reorder rejected
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Reorder(_) => exit_codes::REORDER_REJECTED,
            Self::Config(_)
            | Self::Page(_)
            | Self::Script { .. }
            | Self::Output(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
