//! Git integration for mel.
//!
//! Thin wrappers around `git` subprocesses: repository discovery, identity
//! lookup, remote URLs and the branch operations the workflow commands need.

pub mod branch;
pub mod commands;
pub mod gitdir;
