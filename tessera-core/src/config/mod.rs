//! Editor settings and page documents
//!
//! [`EditorSettings`] are read from a TOML file, by default
//! `<config_dir>/tessera/editor.toml`. A missing file yields defaults; an
//! unreadable or malformed one is an error.
//!
//! Page documents ([`PageDocument`]) are tooling files read and written by the
//! CLI. The format is chosen by file extension: `.toml` or `.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::region::PageDocument;
use crate::registry::ShellPatterns;
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput, span_names};

/// Directory name below the platform config dir
pub const CONFIG_DIR_NAME: &str = "tessera";

/// Settings file name
pub const SETTINGS_FILE: &str = "editor.toml";

/// Longest accepted hover grace period
pub const MAX_HOVER_GRACE_MS: u64 = 10_000;

/// Logging section of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Minimum level
    pub level: TracingLevel,
    /// Custom `EnvFilter` directive; overrides `level`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Log file; standard error when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Delay before a lost hover is cleared, in milliseconds
    pub hover_grace_ms: u64,
    /// Naming patterns of the shell implementations
    pub shell_patterns: ShellPatterns,
    /// Logging configuration
    pub logging: LoggingSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            hover_grace_ms: 300,
            shell_patterns: ShellPatterns::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl EditorSettings {
    /// Hover grace period
    #[must_use]
    pub const fn hover_grace(&self) -> Duration {
        Duration::from_millis(self.hover_grace_ms)
    }

    /// Tracing configuration derived from the logging section
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let mut config = TracingConfig::new().with_level(self.logging.level);
        if let Some(path) = &self.logging.file {
            config = config.with_output(TracingOutput::File { path: path.clone() });
        }
        match &self.logging.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }

    /// Checks value ranges and that the shell patterns compile
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.hover_grace_ms > MAX_HOVER_GRACE_MS {
            return Err(ConfigError::Validation {
                field: "hover_grace_ms".to_string(),
                reason: format!("must be at most {MAX_HOVER_GRACE_MS}"),
            });
        }
        for (field, pattern) in [
            ("shell_patterns.editable", &self.shell_patterns.editable),
            ("shell_patterns.empty", &self.shell_patterns.empty),
        ] {
            Regex::new(pattern).map_err(|e| ConfigError::Validation {
                field: field.to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Loads settings from `path`; a missing file yields defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or fails
    /// validation.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let _span = crate::trace_operation_debug!(span_names::CONFIG_LOAD, file = %path.display()).entered();

        if !path.exists() {
            tracing::debug!("Settings file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        settings.validate()?;
        tracing::debug!(hover_grace_ms = settings.hover_grace_ms, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from the default location, or defaults when the
    /// platform has no config directory
    ///
    /// # Errors
    ///
    /// See [`EditorSettings::load`].
    pub fn load_default() -> ConfigResult<Self> {
        match default_settings_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Writes settings to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        write_file(path, &content)
    }
}

/// Default settings file location
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SETTINGS_FILE))
}

/// Serialization format of a page document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// TOML (`.toml`)
    Toml,
    /// JSON (`.json`)
    Json,
}

impl DocumentFormat {
    /// Picks the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for other extensions.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reads a page document
///
/// # Errors
///
/// Returns an error for unknown extensions, unreadable files and documents
/// that do not parse.
pub fn load_page(path: &Path) -> ConfigResult<PageDocument> {
    let _span = crate::trace_operation_debug!(span_names::CONFIG_LOAD, file = %path.display()).entered();

    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |reason: String| ConfigError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let document: PageDocument = match format {
        DocumentFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        DocumentFormat::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
    };
    tracing::debug!(regions = document.regions.len(), "Page document loaded");
    Ok(document)
}

/// Writes a page document in the format implied by its extension
///
/// # Errors
///
/// Returns an error for unknown extensions or if serialization or the write
/// fails.
pub fn save_page(path: &Path, document: &PageDocument) -> ConfigResult<()> {
    let _span = crate::trace_operation_debug!(span_names::CONFIG_SAVE, file = %path.display()).entered();

    let content = match DocumentFormat::from_path(path)? {
        DocumentFormat::Toml => {
            toml::to_string_pretty(document).map_err(|e| ConfigError::Serialize(e.to_string()))?
        }
        DocumentFormat::Json => {
            serde_json::to_string_pretty(document).map_err(|e| ConfigError::Serialize(e.to_string()))?
        }
    };
    write_file(path, &content)?;
    tracing::info!("Page document saved");
    Ok(())
}

fn write_file(path: &Path, content: &str) -> ConfigResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
