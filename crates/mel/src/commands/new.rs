//! `mel new` -- create a feature branch from free text.

use anyhow::{Context, Result, bail};
use mel_core::branch::sanitize_branch_name;
use mel_git::branch::{create_branch, is_valid_branch_name};
use mel_ui::styles::render_success_line;

use crate::cli::NewArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `mel new` command.
pub fn run(ctx: &RuntimeContext, args: &NewArgs) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let name = sanitize_branch_name(&args.words.join(" "));

    if !is_valid_branch_name(&name, &repo_root)? {
        bail!("`{name}` is not a valid branch name (check for `..`, `//` or a `.lock` suffix)");
    }

    create_branch(&name, args.from.as_deref(), &repo_root)
        .with_context(|| format!("failed to create branch {name}"))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "branch": name,
            "from": args.from,
        }));
    } else if !ctx.quiet {
        println!("{}", render_success_line(&format!("Switched to new branch {name}")));
    }

    Ok(())
}
