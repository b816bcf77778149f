//! Clap CLI definitions for the `mel` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// mel -- git workflow assistant.
///
/// Creates feature branches from free text, runs the project's test
/// commands and merges with a configurable commit message.
#[derive(Parser, Debug)]
#[command(
    name = "mel",
    about = "Git workflow assistant",
    long_about = "Creates feature branches from free text, runs the project's test commands \
                  and merges with a configurable commit message. Per-repository settings \
                  live in .mel/config.json.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Run as if mel was started in this directory.
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Branches =====
    /// Create a feature branch from free text and switch to it.
    #[command(alias = "branch")]
    New(NewArgs),

    /// Merge the main branch into the current branch.
    Update,

    /// Test, then merge the current branch into the main branch.
    Merge(MergeArgs),

    // ===== Commands =====
    /// Run the configured test commands.
    #[command(alias = "t")]
    Test,

    /// Run a named script from the configuration.
    Run(RunArgs),

    // ===== Repository =====
    /// Open the origin repository in a web browser.
    Open(OpenArgs),

    /// Create .mel/config.json from the nearest template.
    Init(InitArgs),

    /// Show the resolved configuration.
    Config(ConfigArgs),

    /// Show the detected package manager.
    Pm,

    // ===== Utilities =====
    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Branches
// ---------------------------------------------------------------------------

/// Arguments for `mel new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Free-form branch description, e.g. `fix login bug`.
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Start the branch from this ref instead of HEAD.
    #[arg(long, value_name = "REF")]
    pub from: Option<String>,
}

/// Arguments for `mel merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Skip the test commands before merging.
    #[arg(long)]
    pub no_test: bool,

    /// Fast-forward the main branch from its upstream before merging.
    #[arg(long)]
    pub pull: bool,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Arguments for `mel run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script name (a key under `scripts`).
    pub script: String,
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Arguments for `mel open`.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Print the URL instead of opening a browser.
    #[arg(long)]
    pub print: bool,
}

/// Arguments for `mel init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Record this branch as `main` in .mel/config.json.
    #[arg(long, value_name = "BRANCH")]
    pub main: Option<String>,
}

/// Arguments for `mel config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print the path of the active configuration file.
    #[arg(long)]
    pub path: bool,
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

/// Arguments for `mel completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
