//! Git command execution wrappers.
//!
//! Provides a thin wrapper around `git` subprocess invocation so that the
//! rest of the codebase does not need to deal with `std::process::Command`
//! directly.

use std::path::Path;
use std::process::{Command, Output};
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running git commands.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be found or spawned.
    #[error("failed to execute git: {0}")]
    SpawnError(#[from] std::io::Error),

    /// The git command exited with a non-zero status.
    #[error("git {args} failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// The arguments passed to git, space separated.
        args: String,
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },

    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepo,

    /// HEAD does not point at a branch.
    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,
}

/// A specialized `Result` type for git operations.
pub type Result<T> = std::result::Result<T, GitError>;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Execute a `git` command with the given arguments and working directory.
///
/// Returns the trimmed contents of stdout on success.
///
/// # Errors
///
/// Returns [`GitError::SpawnError`] if `git` cannot be found, or
/// [`GitError::CommandFailed`] if the command exits with a non-zero status.
///
/// # Examples
///
/// ```no_run
/// use mel_git::commands::git_command;
/// use std::path::Path;
///
/// let branch = git_command(&["symbolic-ref", "--short", "HEAD"], Path::new(".")).unwrap();
/// println!("Current branch: {branch}");
/// ```
pub fn git_command(args: &[&str], cwd: &Path) -> Result<String> {
    let output = run_git(args, cwd)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::CommandFailed {
            args: args.join(" "),
            code: output.status.code(),
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(stdout)
}

/// Run a `git` command whose failure is an answer rather than an error
/// (e.g. `git rev-parse --verify`).
///
/// Returns `Some(stdout)` on success and `None` on a non-zero exit.
///
/// # Errors
///
/// Returns [`GitError::SpawnError`] if `git` cannot be spawned.
pub fn git_query(args: &[&str], cwd: &Path) -> Result<Option<String>> {
    let output = run_git(args, cwd)?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
}

fn run_git(args: &[&str], cwd: &Path) -> Result<Output> {
    debug!(?args, cwd = %cwd.display(), "running git");
    Ok(Command::new("git").args(args).current_dir(cwd).output()?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
