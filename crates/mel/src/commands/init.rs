//! `mel init` -- materialize `.mel/config.json` and report where it came from.

use anyhow::{Context, Result, bail};
use mel_config::config::save_config_file;
use mel_config::mel_dir::project_config_path;
use mel_ui::styles::{render_muted, render_success_line};

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `mel init` command.
///
/// With `--main`, the branch is written into the project config. Other keys,
/// including ones mel does not know, are kept.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let resolved = ctx.resolve_config(&repo_root)?;
    let config_path = project_config_path(&repo_root);

    let mut config = resolved.config.clone();
    if let Some(main) = &args.main {
        let main = main.trim();
        if main.is_empty() {
            bail!("--main needs a branch name");
        }
        config.main = Some(main.to_string());
        save_config_file(&config_path, &config)
            .with_context(|| format!("failed to record main branch in {}", config_path.display()))?;
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "source": resolved.source.as_str(),
            "source_path": resolved.source.path(),
            "config_path": config_path.exists().then_some(&config_path),
            "main": config.main_branch(),
            "materialized": resolved.materialized,
            "gitignore_updated": resolved.gitignore_updated,
        }));
        return Ok(());
    }

    if ctx.quiet {
        return Ok(());
    }

    if config_path.exists() {
        println!(
            "{}",
            render_success_line(&format!("Using {}", config_path.display()))
        );
    } else {
        println!(
            "{}",
            render_success_line("No config file found; using built-in defaults")
        );
        println!(
            "{}",
            render_muted(&format!("Create {} to customize", config_path.display()))
        );
    }
    println!("  source: {}", resolved.source);
    if let Some(main) = config.main_branch() {
        println!("  main:   {main}");
    }

    Ok(())
}
