//! Structured logging for editor sessions
//!
//! [`init_tracing`] installs a `tracing-subscriber` pipeline filtered to the
//! Tessera crates. Edit-mode transitions, highlight commits, sidebar reorders
//! and file I/O run inside spans named in [`span_names`].

use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum TracingError {
    /// The subscriber or its filter could not be set up
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// [`init_tracing`] was already called in this process
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// The log file could not be opened
    #[error("Failed to create log file {path}: {reason}")]
    FileCreationFailed {
        /// Requested log file
        path: PathBuf,
        /// Underlying error
        reason: String,
    },
}

/// Result type for tracing setup
pub type TracingResult<T> = Result<T, TracingError>;

/// Minimum level of emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Rejected writes and failed inputs
    #[serde(alias = "warning")]
    Warn,
    /// Mode changes and saved documents
    #[default]
    Info,
    /// Tree rebuilds and quiet reorder rejections
    Debug,
    /// Every hover transition
    Trace,
}

impl TracingLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines are written.
///
/// Standard output is reserved for command results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard error
    #[default]
    Stderr,
    /// A file, truncated on start; written without ANSI colors
    File {
        /// Log file path
        path: PathBuf,
    },
}

/// Subscriber configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingConfig {
    /// Minimum level for the Tessera crates
    pub level: TracingLevel,
    /// Destination
    pub output: TracingOutput,
    /// `EnvFilter` directive replacing the level-based default
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets a custom filter directive
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Filter directive applied when no custom filter is set
    #[must_use]
    pub fn default_directive(&self) -> String {
        format!("tessera={level},tessera_core={level},tessera_cli={level}", level = self.level)
    }

    fn env_filter(&self) -> TracingResult<EnvFilter> {
        let directive = self.filter.clone().unwrap_or_else(|| self.default_directive());
        EnvFilter::try_new(&directive).map_err(|e| TracingError::InitializationFailed(format!("{directive}: {e}")))
    }
}

/// Installs the global subscriber.
///
/// Only the first call in a process can succeed.
///
/// # Errors
///
/// Returns an error if tracing is already installed, the filter directive
/// does not parse, or the log file cannot be created.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = config.env_filter()?;
    let layer = tracing_subscriber::fmt::layer().with_target(true);
    let installed = match &config.output {
        TracingOutput::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_writer(std::io::stderr))
            .try_init(),
        TracingOutput::File { path } => {
            let file = File::create(path).map_err(|e| TracingError::FileCreationFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()
        }
    };
    installed.map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::info!(level = %config.level, output = ?config.output, "Tracing initialized");
    Ok(())
}

/// Info-level span for a user-visible operation
///
/// ```ignore
/// let _span = trace_operation!(span_names::SIDEBAR_REORDER, from = %from, to = %to).entered();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Debug-level span for frequent operations such as tree rebuilds
#[macro_export]
macro_rules! trace_operation_debug {
    ($name:expr) => {
        tracing::debug_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}

/// Standard span names for editor operations
pub mod span_names {
    /// Edit-mode toggle
    pub const EDIT_MODE_TOGGLE: &str = "edit_mode.toggle";
    /// Click committing a targeted region
    pub const OVERLAY_COMMIT: &str = "overlay.commit";
    /// Sibling reorder
    pub const SIDEBAR_REORDER: &str = "sidebar.reorder";
    /// Region tree rebuild
    pub const TREE_BUILD: &str = "tree.build";
    /// Configuration load span
    pub const CONFIG_LOAD: &str = "config.load";
    /// Configuration save span
    pub const CONFIG_SAVE: &str = "config.save";
    /// Event loop lifetime
    pub const SESSION_RUN: &str = "session.run";
}
