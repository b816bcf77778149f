//! Remote URL normalization.
//!
//! Converts the `origin` remote URL reported by git into the web URL of the
//! repository, e.g. `git@github.com:owner/repo.git` becomes
//! `https://github.com/owner/repo`.

const SSH_SHORTHAND_PREFIX: &str = "git@";
const SSH_URL_PREFIX: &str = "ssh://git@";
const HTTPS_PREFIX: &str = "https://";

/// Parse a raw remote URL into a canonical `https://<host>/<owner>/<repo>`.
///
/// Returns `None` when the remote is empty (no origin configured) or is in a
/// form we don't recognise. Accepted forms:
///
/// - `git@<host>:<owner>/<repo>[.git]`
/// - `ssh://git@<host>/<owner>/<repo>[.git]`
/// - `https://<host>/<owner>/<repo>[.git]`
///
/// # Examples
///
/// ```
/// use mel_core::origin::parse_origin;
///
/// assert_eq!(
///     parse_origin("git@github.com:owner/repo.git").as_deref(),
///     Some("https://github.com/owner/repo"),
/// );
/// assert_eq!(parse_origin("\n"), None);
/// ```
pub fn parse_origin(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    let url = url.strip_suffix(".git").unwrap_or(url);

    if let Some(rest) = url.strip_prefix(SSH_URL_PREFIX) {
        let (host, path) = rest.split_once('/')?;
        return web_url(host, path);
    }

    if let Some(rest) = url.strip_prefix(SSH_SHORTHAND_PREFIX) {
        let (host, path) = rest.split_once(':')?;
        return web_url(host, path);
    }

    if let Some(rest) = url.strip_prefix(HTTPS_PREFIX) {
        let (host, path) = rest.split_once('/')?;
        return web_url(host, path);
    }

    None
}

/// Build the web URL, requiring a non-empty host and an `owner/repo` path.
fn web_url(host: &str, path: &str) -> Option<String> {
    let path = path.trim_matches('/');
    let (owner, repo) = path.split_once('/')?;
    if host.is_empty() || owner.is_empty() || repo.is_empty() {
        return None;
    }
    if host.contains(['/', ':', ' ']) || owner.contains(' ') || repo.contains(' ') {
        return None;
    }
    Some(format!("{HTTPS_PREFIX}{host}/{owner}/{repo}"))
}
