//! Hostname normalization for broker matching.

use url::Url;

/// Extract the hostname from an absolute URL, lowercased and without a
/// leading `www.`.
///
/// Returns `None` for anything that does not parse as a URL with a host.
#[must_use]
pub fn normalize_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let bare = host.strip_prefix("www.").unwrap_or(&host);

    if bare.is_empty() {
        None
    } else {
        Some(bare.to_string())
    }
}
