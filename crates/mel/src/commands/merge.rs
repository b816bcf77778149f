//! `mel merge` -- test, then merge the current branch into the main branch.

use anyhow::{Context, Result, bail};
use mel_config::message::{MessageContext, format_merge_message};
use mel_core::enums::MergeAction;
use mel_git::branch::{merge_branch, pull, switch_branch};
use mel_git::gitdir::{current_author, current_branch};
use mel_ui::styles::render_success_line;
use tracing::info;

use crate::cli::MergeArgs;
use crate::commands::test::{report, run_suite};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `mel merge` command.
///
/// Returns the failing test's exit code when the tests fail; nothing is
/// merged in that case.
pub fn run(ctx: &RuntimeContext, args: &MergeArgs) -> Result<i32> {
    let repo_root = ctx.repo_root()?;
    let resolved = ctx.resolve_config(&repo_root)?;
    let trunk = ctx.trunk(&resolved, &repo_root);
    let branch = current_branch(&repo_root)?;

    if branch == trunk {
        bail!("already on {trunk}; nothing to merge");
    }
    ctx.ensure_clean(&repo_root)?;

    if !args.no_test {
        let run = run_suite(ctx, &resolved.config, &repo_root)?;
        if !ctx.json {
            report(ctx, &run);
        }
        if !run.success() {
            info!(code = run.exit_code(), "tests failed, not merging");
            if ctx.json {
                output_json(&serde_json::json!({
                    "merged": false,
                    "exit_code": run.exit_code(),
                    "results": run.results,
                }));
            }
            return Ok(run.exit_code());
        }
    }

    let message_ctx = MessageContext::new(&branch, &trunk, &current_author(&repo_root));
    let message = format_merge_message(&resolved.config, MergeAction::Merge, &message_ctx);

    switch_branch(&trunk, &repo_root).with_context(|| format!("failed to switch to {trunk}"))?;
    if args.pull {
        if let Err(e) = pull(&repo_root) {
            switch_branch(&branch, &repo_root)
                .with_context(|| format!("failed to pull {trunk}, then failed to switch back to {branch}"))?;
            return Err(anyhow::Error::new(e).context(format!("failed to pull {trunk}; back on {branch}")));
        }
    }
    merge_branch(&branch, &message, true, &repo_root)
        .with_context(|| format!("failed to merge {branch} into {trunk}"))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "merged": true,
            "action": MergeAction::Merge.as_str(),
            "branch": branch,
            "main": trunk,
            "message": message,
        }));
    } else if !ctx.quiet {
        println!("{}", render_success_line(&format!("Merged {branch} into {trunk}")));
    }

    Ok(0)
}
