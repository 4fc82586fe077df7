//! Raw search results.

use serde::{Deserialize, Serialize};
use spectral_broker::normalize_host;

/// One result returned by a search provider, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHit {
    /// Result title
    pub title: String,
    /// Absolute result URL
    pub link: String,
    /// Result snippet; may be empty
    pub snippet: String,
    /// Hostname of `link` without a leading `www.`
    pub source: String,
}

impl RawHit {
    /// Build a hit, deriving `source` from the link.
    ///
    /// Returns `None` when the link has no host, which providers treat as an
    /// unusable result.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Option<Self> {
        let link = link.into();
        let source = normalize_host(&link)?;

        Some(Self {
            title: title.into(),
            link,
            snippet: snippet.into(),
            source,
        })
    }
}
