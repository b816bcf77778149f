//! `mel pm` -- show the detected package manager.

use anyhow::Result;
use mel_core::package_manager::{detect_package_manager, has_package_json};

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `mel pm` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let pm = detect_package_manager(&repo_root);
    let lockfile = repo_root.join(pm.lockfile());

    if ctx.json {
        output_json(&serde_json::json!({
            "package_manager": pm.as_str(),
            "lockfile": lockfile.is_file().then_some(pm.lockfile()),
            "package_json": has_package_json(&repo_root),
        }));
        return Ok(());
    }

    println!("{pm}");
    if !lockfile.is_file() {
        ctx.info(&format!("No lockfile found; defaulting to {pm}"));
    }
    Ok(())
}
