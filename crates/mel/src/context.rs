//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what every command handler needs: the
//! working directory, the user's home directory and the global flags.
//! Repository discovery and config resolution happen lazily so commands
//! such as `version` work outside a repository.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mel_config::gitignore::GITIGNORE_FILE;
use mel_config::mel_dir::{self, ResolvedConfig};
use mel_git::branch::has_uncommitted_changes;
use mel_git::gitdir;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Directory mel acts in (`-C`, else the process working directory).
    pub cwd: PathBuf,

    /// Home directory for the user-level config template.
    pub home: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = match &global.dir {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("failed to get current directory")?,
        };

        Ok(Self {
            cwd,
            home: mel_dir::home_dir(),
            json: global.json,
            quiet: global.quiet,
        })
    }

    /// The top-level directory of the repository containing `cwd`.
    pub fn repo_root(&self) -> Result<PathBuf> {
        gitdir::repo_root(&self.cwd)
            .with_context(|| format!("cannot use {}", self.cwd.display()))
    }

    /// Resolve the repository configuration, materializing a template and
    /// updating `.gitignore` as needed.
    pub fn resolve_config(&self, repo_root: &Path) -> Result<ResolvedConfig> {
        let resolved = mel_dir::resolve(repo_root, self.home.as_deref())?;
        if resolved.materialized {
            self.info(&format!(
                "Created {} from {}",
                mel_dir::project_config_path(repo_root).display(),
                resolved.source
            ));
        }
        if resolved.gitignore_updated {
            self.info("Added .mel/ to .gitignore");
        }
        Ok(resolved)
    }

    /// Fail if tracked files other than `.gitignore` have uncommitted
    /// changes. `.gitignore` is exempt since config resolution appends to it.
    pub fn ensure_clean(&self, repo_root: &Path) -> Result<()> {
        if has_uncommitted_changes(repo_root, &[GITIGNORE_FILE])? {
            bail!("uncommitted changes in {}; commit or stash them first", repo_root.display());
        }
        Ok(())
    }

    /// The trunk branch: `main` from the config, else guessed from git.
    pub fn trunk(&self, resolved: &ResolvedConfig, repo_root: &Path) -> String {
        match resolved.config.main_branch() {
            Some(main) => main.to_string(),
            None => gitdir::guess_main_branch(repo_root),
        }
    }

    /// Print a status line to stderr unless `--quiet` or `--json`.
    pub fn info(&self, message: &str) {
        if !self.quiet && !self.json {
            eprintln!("{}", mel_ui::styles::render_info_line(message));
        }
    }
}
