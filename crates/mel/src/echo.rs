//! Shell wrapper that echoes commands and their output as they finish.

use std::collections::BTreeMap;
use std::path::Path;

use mel_exec::shell::{ExecOutput, Result, ShellExecutor};
use mel_ui::styles::{render_exit_code, render_step};

use crate::output::print_captured;

/// Prints `▸ command` before each command and the captured output after it.
///
/// Silent when `quiet` is set, so JSON output stays clean.
pub struct EchoShell<S> {
    inner: S,
    quiet: bool,
}

impl<S: ShellExecutor> EchoShell<S> {
    pub fn new(inner: S, quiet: bool) -> Self {
        Self { inner, quiet }
    }
}

impl<S: ShellExecutor> ShellExecutor for EchoShell<S> {
    fn execute(&self, command: &str, cwd: &Path, env: &BTreeMap<String, String>) -> Result<ExecOutput> {
        if !self.quiet {
            eprintln!("{}", render_step(command));
        }
        let out = self.inner.execute(command, cwd, env)?;
        if !self.quiet {
            print_captured(&out.output);
            if !out.success() {
                eprintln!("{}", render_exit_code(out.exit_code));
            }
        }
        Ok(out)
    }
}
