//! Core building blocks for the mel workflow assistant.
//!
//! Everything in this crate is pure or only reads the filesystem: branch name
//! sanitizing, origin URL parsing, package manager detection and the shared
//! enums used by the other crates.

pub mod branch;
pub mod enums;
pub mod origin;
pub mod package_manager;
