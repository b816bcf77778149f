//! Shell command execution.
//!
//! Consumers depend on the [`ShellExecutor`] trait rather than on
//! [`SystemShell`] so tests (and the CLI's echoing wrapper) can substitute
//! their own implementation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while executing shell commands.
///
/// A command that runs and exits non-zero is *not* an error; its exit code
/// is reported in [`ExecOutput`].
#[derive(Debug, Error)]
pub enum ExecError {
    /// The shell could not be spawned.
    #[error("failed to run `{command}` in {}: {source}", cwd.display())]
    SpawnError {
        command: String,
        cwd: PathBuf,
        source: std::io::Error,
    },
}

/// A specialized `Result` type for command execution.
pub type Result<T> = std::result::Result<T, ExecError>;

// ---------------------------------------------------------------------------
// Trait and output
// ---------------------------------------------------------------------------

/// The result of running one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// Process exit code (128 + signal number if killed by a signal).
    pub exit_code: i32,
    /// Captured stdout followed by captured stderr.
    pub output: String,
}

impl ExecOutput {
    /// Returns `true` for a zero exit code.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a command string through a shell.
pub trait ShellExecutor {
    /// Run `command` in `cwd` with `env` added to the inherited environment.
    fn execute(&self, command: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<ExecOutput>;
}

impl<T: ShellExecutor + ?Sized> ShellExecutor for &T {
    fn execute(&self, command: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<ExecOutput> {
        (**self).execute(command, cwd, env)
    }
}

// ---------------------------------------------------------------------------
// System implementation
// ---------------------------------------------------------------------------

/// Executes commands with the platform shell (`sh -c` or `cmd /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl ShellExecutor for SystemShell {
    fn execute(&self, command: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<ExecOutput> {
        debug!(command, cwd = %cwd.display(), "executing");

        let output = shell_command(command)
            .current_dir(cwd)
            .envs(env)
            .output()
            .map_err(|source| ExecError::SpawnError {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        let exit_code = exit_code(output.status);
        debug!(command, exit_code, "finished");

        Ok(ExecOutput {
            exit_code,
            output: combined,
        })
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
