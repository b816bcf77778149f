//! Merge message formatting.
//!
//! Messages come from the `merge_message` template in the config, or from a
//! built-in default chosen by [`MergeAction`]. Substitution is a single
//! left-to-right pass over a fixed set of placeholders; anything else in
//! braces is copied through untouched.

use crate::config::MelConfig;
use chrono::{DateTime, Local};
use mel_core::enums::MergeAction;

/// Default template for merging a branch into the trunk.
pub const DEFAULT_MERGE_TEMPLATE: &str = "Merge {branch} into {main}";

/// Default template for merging the trunk into a branch.
pub const DEFAULT_UPDATE_TEMPLATE: &str = "Merge {main} into {branch}";

/// Format used for the `{datetime}` placeholder.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values substituted into a merge message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub branch: String,
    pub main: String,
    pub author: String,
    pub datetime: String,
}

impl MessageContext {
    /// Build a context stamped with the current local time.
    pub fn new(branch: &str, main: &str, author: &str) -> Self {
        Self::at(branch, main, author, Local::now())
    }

    /// Build a context stamped with `now`.
    pub fn at(branch: &str, main: &str, author: &str, now: DateTime<Local>) -> Self {
        Self {
            branch: branch.to_string(),
            main: main.to_string(),
            author: author.to_string(),
            datetime: now.format(DATETIME_FORMAT).to_string(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "branch" => Some(&self.branch),
            "main" => Some(&self.main),
            "author" => Some(&self.author),
            "datetime" => Some(&self.datetime),
            _ => None,
        }
    }
}

/// The built-in template for `action`.
pub fn default_template(action: MergeAction) -> &'static str {
    match action {
        MergeAction::Merge => DEFAULT_MERGE_TEMPLATE,
        MergeAction::Update => DEFAULT_UPDATE_TEMPLATE,
    }
}

/// Format the merge message for `action` using the configured template, or
/// the built-in default when the config has none.
pub fn format_merge_message(config: &MelConfig, action: MergeAction, ctx: &MessageContext) -> String {
    let template = config
        .merge_template()
        .unwrap_or_else(|| default_template(action));
    render_template(template, ctx)
}

/// Substitute `{branch}`, `{main}`, `{author}` and `{datetime}` in `template`.
///
/// Unknown placeholders and stray braces are left verbatim, and substituted
/// values are never scanned again.
pub fn render_template(template: &str, ctx: &MessageContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let placeholder = tail[1..]
            .find('}')
            .and_then(|end| ctx.lookup(&tail[1..=end]).map(|value| (value, end + 2)));

        match placeholder {
            Some((value, len)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
