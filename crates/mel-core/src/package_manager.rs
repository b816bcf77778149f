//! JavaScript package manager detection from lockfiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A JavaScript package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// npm, used when no other marker is present.
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

/// Lockfile markers, highest priority first.
const MARKERS: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Returns the executable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// The lockfile that selects this package manager.
    pub fn lockfile(&self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Shell command that runs the `package.json` script `name`.
    pub fn run_script(&self, name: &str) -> String {
        match self {
            Self::Yarn => format!("yarn {name}"),
            Self::Npm | Self::Pnpm => format!("{} run {name}", self.as_str()),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the package manager used in `dir`.
///
/// When several lockfiles coexist the highest-priority one wins
/// (pnpm, then yarn, then npm). With no lockfile at all, npm is assumed.
pub fn detect_package_manager(dir: &Path) -> PackageManager {
    MARKERS
        .iter()
        .find(|(marker, _)| dir.join(marker).is_file())
        .map(|(_, pm)| *pm)
        .unwrap_or_default()
}

/// Returns `true` if `dir` contains a `package.json`.
pub fn has_package_json(dir: &Path) -> bool {
    dir.join("package.json").is_file()
}
