//! `mel run` -- run a named script.

use anyhow::{Result, bail};
use mel_config::mel_dir::project_config_path;
use mel_exec::runner::{run_commands, script_command};
use mel_exec::shell::SystemShell;

use crate::cli::RunArgs;
use crate::context::RuntimeContext;
use crate::echo::EchoShell;
use crate::output::output_json;

/// Execute the `mel run` command. Returns the script's exit code.
pub fn run(ctx: &RuntimeContext, args: &RunArgs) -> Result<i32> {
    let repo_root = ctx.repo_root()?;
    let resolved = ctx.resolve_config(&repo_root)?;

    let Some(command) = script_command(&resolved.config, &args.script, &repo_root) else {
        bail!(
            "no script named `{}` in {}",
            args.script,
            project_config_path(&repo_root).display()
        );
    };

    let shell = EchoShell::new(SystemShell, ctx.quiet || ctx.json);
    let run = run_commands(&[command.as_str()], &repo_root, &shell)?;
    let code = run.exit_code();

    if ctx.json {
        output_json(&serde_json::json!({
            "script": args.script,
            "command": command,
            "exit_code": code,
            "output": run.results.first().map(|r| r.output.as_str()).unwrap_or_default(),
        }));
    }

    Ok(code)
}
