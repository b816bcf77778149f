//! `mel` -- git workflow assistant CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers. `test`, `run` and `merge` propagate the
//! exit code of the failing command as the process exit code.

mod cli;
mod commands;
mod context;
mod echo;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Exit code after Ctrl+C: 128 + SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn main() {
    let _ = ctrlc::set_handler(|| std::process::exit(INTERRUPTED_EXIT_CODE));

    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("mel=debug,mel_config=debug,mel_git=debug,mel_exec=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| dispatch(&ctx, cli.command));

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if cli.global.json {
                let err_json = serde_json::json!({
                    "error": format!("{:#}", e),
                });
                if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                    eprintln!("{}", s);
                }
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(1);
        }
    }
}

/// Run the selected command and return the process exit code.
fn dispatch(ctx: &RuntimeContext, command: Option<Commands>) -> anyhow::Result<i32> {
    match command {
        Some(Commands::New(args)) => commands::new::run(ctx, &args).map(|()| 0),
        Some(Commands::Update) => commands::update::run(ctx).map(|()| 0),
        Some(Commands::Merge(args)) => commands::merge::run(ctx, &args),
        Some(Commands::Test) => commands::test::run(ctx),
        Some(Commands::Run(args)) => commands::run::run(ctx, &args),
        Some(Commands::Open(args)) => commands::open::run(ctx, &args).map(|()| 0),
        Some(Commands::Init(args)) => commands::init::run(ctx, &args).map(|()| 0),
        Some(Commands::Config(args)) => commands::config_cmd::run(ctx, &args).map(|()| 0),
        Some(Commands::Pm) => commands::pm::run(ctx).map(|()| 0),
        Some(Commands::Completion(args)) => commands::completion::run(ctx, &args).map(|()| 0),
        Some(Commands::Version) => commands::version::run(ctx).map(|()| 0),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(0)
        }
    }
}
