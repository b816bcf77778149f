//! `mel open` -- open the origin repository in a browser.

use anyhow::Result;
use mel_core::origin::parse_origin;
use mel_git::gitdir::origin_remote_url;
use mel_ui::styles::render_warn_line;
use tracing::debug;

use crate::cli::OpenArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `mel open` command.
///
/// A missing or unrecognised origin is reported, not treated as an error.
pub fn run(ctx: &RuntimeContext, args: &OpenArgs) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let raw = origin_remote_url(&repo_root)?;
    let url = parse_origin(&raw);
    debug!(remote = %raw, url = ?url, "resolved origin");

    if ctx.json {
        output_json(&serde_json::json!({ "remote": raw, "url": url }));
        return Ok(());
    }

    let Some(url) = url else {
        if raw.is_empty() {
            ctx.info("No origin remote configured");
        } else {
            ctx.info(&format!("Cannot derive a web URL from origin {raw}"));
        }
        return Ok(());
    };

    if args.print {
        println!("{url}");
        return Ok(());
    }

    if let Err(e) = webbrowser::open(&url) {
        eprintln!("{}", render_warn_line(&format!("Could not open browser: {e}")));
        println!("{url}");
    } else {
        ctx.info(&format!("Opened {url}"));
    }

    Ok(())
}
