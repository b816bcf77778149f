//! Command execution for mel.
//!
//! [`shell`] defines the [`ShellExecutor`](shell::ShellExecutor) seam and its
//! system implementation; [`runner`] decides which configured commands to
//! run and runs them in order, stopping at the first failure.

pub mod runner;
pub mod shell;
