//! Test command runner.
//!
//! Decides which configured commands make up the test suite and runs them
//! one at a time in the repository root, stopping at the first failure.

use crate::shell::{Result, ShellExecutor};
use mel_config::config::MelConfig;
use mel_core::package_manager::{detect_package_manager, has_package_json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Name of the script that supersedes `test_commands`.
pub const TEST_SCRIPT: &str = "test";

/// Environment variable carrying the repository root into every command.
pub const REPO_ROOT_ENV: &str = "MEL_REPO_ROOT";

/// Outcome of a single command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub command: String,
    pub exit_code: i32,
    pub output: String,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestRun {
    /// Commands that ran, in order. Only the last one can have failed.
    pub results: Vec<CommandResult>,
    /// Commands not run because an earlier one failed.
    pub skipped: Vec<String>,
}

impl TestRun {
    /// Exit code of the run: the failing command's code, or 0.
    pub fn exit_code(&self) -> i32 {
        self.results
            .iter()
            .map(|r| r.exit_code)
            .find(|code| *code != 0)
            .unwrap_or(0)
    }

    /// Returns `true` if every command that ran succeeded.
    pub fn success(&self) -> bool {
        self.exit_code() == 0
    }
}

/// The ordered list of test commands for `config`.
///
/// `scripts.test` wins when present; otherwise the legacy `test_commands`
/// are used in declared order. With neither, the list is empty.
pub fn test_commands_for(config: &MelConfig) -> Vec<&str> {
    match config.script(TEST_SCRIPT) {
        Some(script) => vec![script],
        None => config.test_commands.iter().map(String::as_str).collect(),
    }
}

/// The command that runs the named script.
///
/// Configured `scripts` take priority. Otherwise, when the repository has a
/// `package.json`, the detected package manager's script invocation is used.
pub fn script_command(config: &MelConfig, name: &str, repo_root: &Path) -> Option<String> {
    if let Some(script) = config.script(name) {
        return Some(script.to_string());
    }
    if has_package_json(repo_root) {
        return Some(detect_package_manager(repo_root).run_script(name));
    }
    None
}

/// Extra environment for commands run in `repo_root`.
///
/// Sets [`REPO_ROOT_ENV`] and, when `node_modules/.bin` exists, puts it in
/// front of `PATH`.
pub fn command_env(repo_root: &Path) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert(REPO_ROOT_ENV.to_string(), repo_root.display().to_string());

    let bin = repo_root.join("node_modules").join(".bin");
    if bin.is_dir() {
        let mut paths = vec![bin];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        match std::env::join_paths(paths) {
            Ok(joined) => {
                env.insert("PATH".to_string(), joined.to_string_lossy().into_owned());
            }
            Err(e) => warn!("not adding node_modules/.bin to PATH: {e}"),
        }
    }

    env
}

/// Run `commands` in order in `repo_root`, stopping at the first failure.
///
/// # Errors
///
/// Returns an error only if the shell cannot be spawned. Non-zero exit codes
/// are reported in the returned [`TestRun`].
pub fn run_commands<S: ShellExecutor>(commands: &[&str], repo_root: &Path, shell: &S) -> Result<TestRun> {
    let env = command_env(repo_root);
    let mut run = TestRun::default();

    for (i, command) in commands.iter().enumerate() {
        let out = shell.execute(command, repo_root, &env)?;
        let failed = !out.success();
        run.results.push(CommandResult {
            command: (*command).to_string(),
            exit_code: out.exit_code,
            output: out.output,
        });

        if failed {
            info!(command, exit_code = run.exit_code(), "command failed, stopping");
            run.skipped = commands[i + 1..].iter().map(|c| (*c).to_string()).collect();
            break;
        }
    }

    Ok(run)
}

/// Run the configured test commands and return the resulting exit code.
///
/// Zero commands configured means success.
///
/// # Errors
///
/// Returns an error only if the shell cannot be spawned.
pub fn run_tests<S: ShellExecutor>(config: &MelConfig, repo_root: &Path, shell: &S) -> Result<i32> {
    let commands = test_commands_for(config);
    Ok(run_commands(&commands, repo_root, shell)?.exit_code())
}
