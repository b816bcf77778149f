//! Enum types shared across the mel crates.
//!
//! Each enum has `as_str()`, a `Display` impl and a lenient constructor from
//! user-facing strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of merge a message is being formatted for.
///
/// Only affects which built-in template is used when the project does not
/// configure `merge_message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeAction {
    /// Merge a feature branch into the trunk.
    #[default]
    Merge,
    /// Bring the trunk into the current feature branch.
    Update,
}

impl MergeAction {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Update => "update",
        }
    }

    /// Parse an action name. Anything other than `update` is a plain merge.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("update") {
            Self::Update
        } else {
            Self::Merge
        }
    }
}

impl fmt::Display for MergeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MergeAction {
    fn from(s: &str) -> Self {
        Self::from_name(s)
    }
}
