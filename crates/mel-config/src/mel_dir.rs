//! Discovery and materialization of the `.mel/` configuration tiers.
//!
//! Resolution is split in two phases so the decision can be tested without
//! touching the filesystem:
//!
//! 1. [`locate`] picks the highest-priority [`ConfigSource`] that exists.
//! 2. [`materialize`] copies a template tier into `.mel/config.json`. It is a
//!    no-op once the project config exists.
//!
//! [`resolve`] runs both phases, loads the result and makes sure `.mel/` is
//! gitignored.

use crate::config::{self, MelConfig, Result};
use crate::gitignore::ensure_gitignore;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The name of the mel metadata directory.
pub const MEL_DIR_NAME: &str = ".mel";

/// File name of the authoritative project config.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// File name of config templates (project-local and user-global).
pub const TEMPLATE_FILE_NAME: &str = "config_template.json";

/// Where a resolved configuration came from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    /// `<repo_root>/.mel/config.json`.
    Project(PathBuf),
    /// `<repo_root>/.mel/config_template.json`.
    ProjectTemplate(PathBuf),
    /// `<home>/.mel/config_template.json`.
    UserTemplate(PathBuf),
    /// No file anywhere; built-in defaults.
    Default,
}

impl ConfigSource {
    /// Returns the short tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project(_) => "project",
            Self::ProjectTemplate(_) => "project-template",
            Self::UserTemplate(_) => "user-template",
            Self::Default => "default",
        }
    }

    /// The file backing this tier, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Project(p) | Self::ProjectTemplate(p) | Self::UserTemplate(p) => {
                Some(p.as_path())
            }
            Self::Default => None,
        }
    }

    /// Returns `true` for the two template tiers.
    pub fn is_template(&self) -> bool {
        matches!(self, Self::ProjectTemplate(_) | Self::UserTemplate(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{} ({})", self.as_str(), p.display()),
            None => f.write_str(self.as_str()),
        }
    }
}

/// The outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// The parsed configuration.
    pub config: MelConfig,
    /// The tier the configuration was taken from.
    pub source: ConfigSource,
    /// Whether this call wrote `.mel/config.json` from a template.
    pub materialized: bool,
    /// Whether this call appended `.mel/` to `.gitignore`.
    pub gitignore_updated: bool,
}

/// Path of `<repo_root>/.mel/`.
pub fn mel_dir(repo_root: &Path) -> PathBuf {
    repo_root.join(MEL_DIR_NAME)
}

/// Path of the project config file.
pub fn project_config_path(repo_root: &Path) -> PathBuf {
    mel_dir(repo_root).join(CONFIG_FILE_NAME)
}

/// Path of the project-local template.
pub fn project_template_path(repo_root: &Path) -> PathBuf {
    mel_dir(repo_root).join(TEMPLATE_FILE_NAME)
}

/// Path of the user-global template under `home`.
pub fn user_template_path(home: &Path) -> PathBuf {
    mel_dir(home).join(TEMPLATE_FILE_NAME)
}

/// Pick the highest-priority configuration tier that exists.
///
/// Only checks for file existence; nothing is read or written.
pub fn locate(repo_root: &Path, home: Option<&Path>) -> ConfigSource {
    let project = project_config_path(repo_root);
    if project.is_file() {
        return ConfigSource::Project(project);
    }

    let project_template = project_template_path(repo_root);
    if project_template.is_file() {
        return ConfigSource::ProjectTemplate(project_template);
    }

    if let Some(home) = home {
        let user_template = user_template_path(home);
        if user_template.is_file() {
            return ConfigSource::UserTemplate(user_template);
        }
    }

    ConfigSource::Default
}

/// Copy a template tier into `<repo_root>/.mel/config.json`.
///
/// The template is validated first and then written verbatim. Returns
/// `Ok(true)` if the file was written, `Ok(false)` if there was nothing to do
/// (non-template source, or the project config already exists).
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`](crate::config::ConfigError::ParseError)
/// for a malformed template, in which case nothing is written, or a
/// read/write error.
pub fn materialize(repo_root: &Path, source: &ConfigSource) -> Result<bool> {
    let template = match source {
        ConfigSource::ProjectTemplate(p) | ConfigSource::UserTemplate(p) => p,
        ConfigSource::Project(_) | ConfigSource::Default => return Ok(false),
    };

    let target = project_config_path(repo_root);
    if target.exists() {
        debug!(path = %target.display(), "project config already present");
        return Ok(false);
    }

    let content = config::read_config_text(template)?;
    config::parse_config(&content, template)?;
    config::write_config_file(&target, &content)?;

    info!(
        from = %template.display(),
        to = %target.display(),
        "materialized config template"
    );
    Ok(true)
}

/// Resolve the configuration for the repository at `repo_root`.
///
/// `home` is the user's home directory, used for the global template; pass
/// `None` to skip that tier.
///
/// # Errors
///
/// Fails if any config or template file involved is unreadable or malformed,
/// or if `.mel/config.json` / `.gitignore` cannot be written.
pub fn resolve(repo_root: &Path, home: Option<&Path>) -> Result<ResolvedConfig> {
    let gitignore_updated = ensure_gitignore(repo_root)?;

    let source = locate(repo_root, home);
    debug!(source = %source, "located config");

    let materialized = materialize(repo_root, &source)?;

    let config = match &source {
        ConfigSource::Default => MelConfig::default(),
        ConfigSource::Project(_) | ConfigSource::ProjectTemplate(_) | ConfigSource::UserTemplate(_) => {
            config::load_config_file(&project_config_path(repo_root))?
        }
    };

    Ok(ResolvedConfig {
        config,
        source,
        materialized,
        gitignore_updated,
    })
}

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
