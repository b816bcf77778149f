//! `mel version` -- print the mel version and target platform.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Version and platform of the running binary.
#[derive(Debug, Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    target: String,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.target)
    }
}

/// Execute the `mel version` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let info = VersionInfo::current();
    if ctx.json {
        output_json(&info);
    } else {
        println!("{info}");
    }
    Ok(())
}
