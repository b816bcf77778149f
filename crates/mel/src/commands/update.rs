//! `mel update` -- merge the main branch into the current branch.

use anyhow::{Context, Result, bail};
use mel_config::message::{MessageContext, format_merge_message};
use mel_core::enums::MergeAction;
use mel_git::branch::merge_branch;
use mel_git::gitdir::{current_author, current_branch};
use mel_ui::styles::render_success_line;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `mel update` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let resolved = ctx.resolve_config(&repo_root)?;
    let trunk = ctx.trunk(&resolved, &repo_root);
    let branch = current_branch(&repo_root)?;

    if branch == trunk {
        bail!("already on {trunk}; switch to a feature branch to update it");
    }
    ctx.ensure_clean(&repo_root)?;

    let message_ctx = MessageContext::new(&branch, &trunk, &current_author(&repo_root));
    let message = format_merge_message(&resolved.config, MergeAction::Update, &message_ctx);

    merge_branch(&trunk, &message, false, &repo_root)
        .with_context(|| format!("failed to merge {trunk} into {branch}"))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "action": MergeAction::Update.as_str(),
            "branch": branch,
            "main": trunk,
            "message": message,
        }));
    } else if !ctx.quiet {
        println!("{}", render_success_line(&format!("Merged {trunk} into {branch}")));
    }

    Ok(())
}
