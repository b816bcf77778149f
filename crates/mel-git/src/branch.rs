//! Branch lifecycle operations: create, switch, merge, pull.

use crate::commands::{Result, git_command, git_query};
use std::path::Path;
use tracing::info;

/// Create `name` (optionally from `start_point`) and switch to it.
pub fn create_branch(name: &str, start_point: Option<&str>, cwd: &Path) -> Result<()> {
    let mut args = vec!["checkout", "-q", "-b", name];
    if let Some(start) = start_point {
        args.push(start);
    }
    git_command(&args, cwd)?;
    info!(branch = name, "created branch");
    Ok(())
}

/// Switch the working tree to an existing branch.
pub fn switch_branch(name: &str, cwd: &Path) -> Result<()> {
    git_command(&["checkout", "-q", name], cwd)?;
    Ok(())
}

/// Merge `branch` into the checked-out branch with `message`.
///
/// With `no_ff` a merge commit is always created.
pub fn merge_branch(branch: &str, message: &str, no_ff: bool, cwd: &Path) -> Result<()> {
    let mut args = vec!["merge", "-q"];
    if no_ff {
        args.push("--no-ff");
    }
    args.extend(["-m", message, branch]);
    git_command(&args, cwd)?;
    info!(branch, "merged branch");
    Ok(())
}

/// Fast-forward the checked-out branch from its upstream.
///
/// # Errors
///
/// Returns [`GitError::CommandFailed`](crate::commands::GitError::CommandFailed)
/// when there is no upstream or the histories have diverged.
pub fn pull(cwd: &Path) -> Result<()> {
    git_command(&["pull", "-q", "--ff-only"], cwd)?;
    info!("pulled upstream changes");
    Ok(())
}

/// Returns `true` if git accepts `name` as a branch name
/// (`git check-ref-format --branch`).
pub fn is_valid_branch_name(name: &str, cwd: &Path) -> Result<bool> {
    Ok(git_query(&["check-ref-format", "--branch", name], cwd)?.is_some())
}

/// Returns `true` if the working tree has uncommitted changes to tracked
/// files other than `ignored` (paths relative to the repository root).
pub fn has_uncommitted_changes(cwd: &Path, ignored: &[&str]) -> Result<bool> {
    let excludes: Vec<String> = ignored.iter().map(|p| format!(":(top,exclude){p}")).collect();
    let mut args = vec!["status", "--porcelain", "--untracked-files=no", "--", ":/"];
    args.extend(excludes.iter().map(String::as_str));
    let status = git_command(&args, cwd)?;
    Ok(!status.is_empty())
}
