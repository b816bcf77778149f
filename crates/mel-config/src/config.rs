//! Configuration types and loading for mel.
//!
//! The main entry point is [`MelConfig`], which represents the contents of
//! `.mel/config.json` (and of the config templates, which share the schema).
//! Files are loaded with [`load_config_file`]; [`write_config_file`] writes
//! them atomically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A configuration file (or `.gitignore`) could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A configuration or template file is not valid JSON for the schema.
    #[error("failed to parse config file {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The mel configuration, corresponding to `.mel/config.json`.
///
/// Every recognised key is optional. Keys mel does not know about are kept
/// in [`MelConfig::extra`] so they survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MelConfig {
    /// Name of the trunk branch (e.g. `"main"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,

    /// Legacy list of test commands, run in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test_commands: Vec<String>,

    /// Named scripts. `scripts.test` supersedes `test_commands`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,

    /// Merge message template with `{branch}`, `{main}`, `{author}` and
    /// `{datetime}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_message: Option<String>,

    /// Unrecognised keys, preserved but never interpreted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MelConfig {
    /// Look up a named script.
    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    /// The configured trunk branch, ignoring blank values.
    pub fn main_branch(&self) -> Option<&str> {
        self.main
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// The configured merge message template, ignoring blank values.
    pub fn merge_template(&self) -> Option<&str> {
        self.merge_message
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse configuration JSON. `path` is only used for error messages.
///
/// An empty (or whitespace-only) document yields the default config.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] naming `path` if the content is not a
/// JSON object matching the schema.
pub fn parse_config(content: &str, path: &Path) -> Result<MelConfig> {
    if content.trim().is_empty() {
        return Ok(MelConfig::default());
    }
    serde_json::from_str(content).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a config or template file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file cannot be read.
pub fn read_config_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and parse the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file cannot be read, or
/// [`ConfigError::ParseError`] if it is malformed.
pub fn load_config_file(path: &Path) -> Result<MelConfig> {
    let content = read_config_text(path)?;
    parse_config(&content, path)
}

/// Atomically write `content` to `path`.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old file or the complete
/// new one. Parent directories are created as needed.
///
/// # Errors
///
/// Returns [`ConfigError::WriteError`] on any I/O failure.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    let write_err = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Serialize `config` as pretty JSON and write it atomically to `path`.
///
/// # Errors
///
/// Returns [`ConfigError::SerializeError`] or [`ConfigError::WriteError`].
pub fn save_config_file(path: &Path, config: &MelConfig) -> Result<()> {
    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    write_config_file(path, &json)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
