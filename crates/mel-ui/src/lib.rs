//! Terminal UI helpers for mel.
//!
//! Provides Ayu-themed color styling and terminal detection for CLI output.

pub mod styles;
pub mod terminal;
