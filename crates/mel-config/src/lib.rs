//! Configuration management for mel.
//!
//! This crate resolves the per-repository `.mel/config.json` through its
//! tiers (project config, project template, user template, built-in
//! default), materializes templates into the project, keeps `.mel/` out of
//! version control and renders merge messages from the configured template.

pub mod config;
pub mod gitignore;
pub mod mel_dir;
pub mod message;
