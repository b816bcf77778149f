//! `mel config` -- show the resolved configuration.

use anyhow::{Context, Result};

use crate::cli::ConfigArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `mel config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let resolved = ctx.resolve_config(&repo_root)?;
    let trunk = ctx.trunk(&resolved, &repo_root);

    if args.path {
        match resolved.source.path() {
            Some(path) => println!("{}", path.display()),
            None => ctx.info("No config file; using built-in defaults"),
        }
        return Ok(());
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "source": resolved.source.as_str(),
            "path": resolved.source.path(),
            "main": trunk,
            "config": resolved.config,
        }));
        return Ok(());
    }

    let body = serde_json::to_string_pretty(&resolved.config)
        .context("failed to serialize configuration")?;
    if !ctx.quiet {
        eprintln!("# source: {} (main branch: {trunk})", resolved.source);
    }
    println!("{body}");
    Ok(())
}
