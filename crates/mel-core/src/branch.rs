//! Branch name sanitizing.
//!
//! Turns free-form user input ("Fix login page!") into something git will
//! accept as a ref component ("fix-login-page"). The function is total: when
//! nothing usable survives, a timestamped fallback name is produced instead.

use chrono::{DateTime, Utc};

/// Prefix used for generated fallback branch names.
pub const FALLBACK_PREFIX: &str = "mel-";

/// Name git reserves for the current checkout.
const RESERVED_NAME: &str = "head";

/// Sanitize `raw` into a valid git branch name.
///
/// Output always matches `^[a-z0-9._/-]+$`, is never empty and is never
/// `head`. See [`sanitize_branch_name_at`] for the rules.
pub fn sanitize_branch_name(raw: &str) -> String {
    sanitize_branch_name_at(raw, Utc::now())
}

/// Sanitize `raw`, using `now` for the fallback name.
///
/// 1. Trim and lowercase.
/// 2. Replace each run of characters outside `[a-z0-9._/-]` with one `-`.
/// 3. Collapse repeated `-` and strip them from both ends.
/// 4. If the result is empty or `head`, return `mel-<unix seconds>`.
///
/// Names that are already valid (`feature/foo`, `a.b/c_d-1`) come back
/// unchanged.
///
/// The character filter does not enforce every git ref rule: `a//b`, `a..b`
/// and `x.lock` pass through and are still rejected by git. Callers creating
/// branches should check the result with `git check-ref-format --branch`.
pub fn sanitize_branch_name_at(raw: &str, now: DateTime<Utc>) -> String {
    let lowered = raw.trim().to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if is_allowed(c) {
            if c == '-' && out.ends_with('-') {
                continue;
            }
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(RESERVED_NAME) {
        return fallback_name(now);
    }
    trimmed.to_string()
}

/// Build the fallback branch name for the given instant.
pub fn fallback_name(now: DateTime<Utc>) -> String {
    format!("{FALLBACK_PREFIX}{}", now.timestamp())
}

fn is_allowed(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '/' | '-')
}
