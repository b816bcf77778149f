//! Keeps `.mel/` listed in the repository's `.gitignore`.

use crate::config::{ConfigError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Name of the ignore file at the repository root.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// The line mel guarantees in `.gitignore`.
pub const GITIGNORE_ENTRY: &str = ".mel/";

/// Spellings that already ignore the `.mel` directory.
const EQUIVALENT_ENTRIES: &[&str] = &[".mel/", ".mel", "/.mel/", "/.mel"];

/// Returns `true` if `content` already has a line ignoring `.mel/`.
pub fn has_mel_entry(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .any(|line| EQUIVALENT_ENTRIES.contains(&line))
}

/// Make sure `<repo_root>/.gitignore` contains a `.mel/` line.
///
/// Existing content and ordering are kept; the entry is appended only when
/// missing (repairing a missing final newline first). The file is created if
/// it does not exist. Returns `true` if the file was changed.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] or [`ConfigError::WriteError`] on I/O
/// failure.
pub fn ensure_gitignore(repo_root: &Path) -> Result<bool> {
    let path = repo_root.join(GITIGNORE_FILE);

    let existing = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };

    if has_mel_entry(&existing) {
        return Ok(false);
    }

    let mut addition = String::new();
    if !existing.is_empty() && !existing.ends_with('\n') {
        addition.push('\n');
    }
    addition.push_str(GITIGNORE_ENTRY);
    addition.push('\n');

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut file| file.write_all(addition.as_bytes()))
        .map_err(|source| ConfigError::WriteError {
            path: path.clone(),
            source,
        })?;

    debug!(path = %path.display(), "added {GITIGNORE_ENTRY} to .gitignore");
    Ok(true)
}
