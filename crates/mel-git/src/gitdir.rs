//! Repository discovery and information lookups.
//!
//! Provides functions for finding the repository root, the current branch,
//! the `origin` remote, the commit author and the trunk branch.

use crate::commands::{GitError, Result, git_command, git_query};
use std::path::{Path, PathBuf};

/// Branch names tried, in order, when guessing the trunk.
const TRUNK_CANDIDATES: &[&str] = &["main", "master"];

/// Fallback trunk name when nothing can be detected.
pub const DEFAULT_TRUNK: &str = "main";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Get the repository root using `git rev-parse --show-toplevel`.
///
/// # Errors
///
/// Returns [`GitError::NotARepo`] if `cwd` is not inside a work tree, or
/// [`GitError::SpawnError`] if git is unavailable.
pub fn repo_root(cwd: &Path) -> Result<PathBuf> {
    match git_command(&["rev-parse", "--show-toplevel"], cwd) {
        Ok(output) if !output.is_empty() => Ok(PathBuf::from(normalize_git_path(&output))),
        Ok(_) | Err(GitError::CommandFailed { .. }) => Err(GitError::NotARepo),
        Err(e) => Err(e),
    }
}

/// Name of the checked-out branch.
///
/// Works on unborn branches (fresh repositories without commits).
///
/// # Errors
///
/// Returns [`GitError::DetachedHead`] when HEAD is not a branch.
pub fn current_branch(cwd: &Path) -> Result<String> {
    match git_query(&["symbolic-ref", "--quiet", "--short", "HEAD"], cwd)? {
        Some(branch) if !branch.is_empty() => Ok(branch),
        _ => Err(GitError::DetachedHead),
    }
}

/// Raw URL of the `origin` remote, or an empty string if none is set.
///
/// # Errors
///
/// Returns [`GitError::SpawnError`] if git is unavailable.
pub fn origin_remote_url(cwd: &Path) -> Result<String> {
    Ok(git_query(&["config", "--get", "remote.origin.url"], cwd)?.unwrap_or_default())
}

/// Retrieve `user.name` from git configuration, if set.
pub fn git_user_name(cwd: &Path) -> Option<String> {
    git_query(&["config", "user.name"], cwd)
        .ok()
        .flatten()
        .filter(|name| !name.is_empty())
}

/// The author name used in merge messages.
///
/// Priority: `git config user.name` > `$USER` / `$USERNAME` > `"unknown"`.
pub fn current_author(cwd: &Path) -> String {
    if let Some(name) = git_user_name(cwd) {
        return name;
    }
    if let Ok(user) = std::env::var("USER").or_else(|_| std::env::var("USERNAME")) {
        if !user.is_empty() {
            return user;
        }
    }
    "unknown".to_string()
}

/// Returns `true` if a local branch called `name` exists.
pub fn branch_exists(name: &str, cwd: &Path) -> Result<bool> {
    let refname = format!("refs/heads/{name}");
    Ok(git_query(&["rev-parse", "--verify", "--quiet", &refname], cwd)?.is_some())
}

/// Guess the trunk branch when the config does not name one.
///
/// Uses the target of `origin/HEAD` if known, otherwise the first of
/// `main` / `master` that exists locally, otherwise [`DEFAULT_TRUNK`].
pub fn guess_main_branch(cwd: &Path) -> String {
    if let Ok(Some(head)) = git_query(
        &["symbolic-ref", "--quiet", "--short", "refs/remotes/origin/HEAD"],
        cwd,
    ) {
        if let Some(name) = head.strip_prefix("origin/") {
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }

    for candidate in TRUNK_CANDIDATES {
        if matches!(branch_exists(candidate, cwd), Ok(true)) {
            return (*candidate).to_string();
        }
    }

    DEFAULT_TRUNK.to_string()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Normalize git paths for Windows compatibility.
///
/// Git on Windows may return MSYS-style paths like `/c/Users/...` or forward-
/// slash paths like `C:/Users/...`. This function converts them to native
/// format.
fn normalize_git_path(path: &str) -> String {
    if std::path::MAIN_SEPARATOR != '\\' {
        return path.to_string();
    }

    let path = path.trim();

    // Convert /c/Users/... to C:\Users\...
    if path.len() >= 3
        && path.as_bytes()[0] == b'/'
        && path.as_bytes()[2] == b'/'
        && path.as_bytes()[1].is_ascii_alphabetic()
    {
        let drive = path.as_bytes()[1].to_ascii_uppercase() as char;
        let rest = &path[2..];
        return format!("{drive}:{}", rest.replace('/', "\\"));
    }

    path.replace('/', "\\")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
