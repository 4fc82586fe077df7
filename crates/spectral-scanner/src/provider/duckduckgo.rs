//! DuckDuckGo HTML endpoint provider.
//!
//! Used as the secondary tier. The HTML endpoint needs no credentials and no
//! JavaScript; results are scraped from its markup.

use super::SearchProvider;
use crate::error::{Result, ScanError};
use crate::hit::RawHit;
use crate::query::SearchQuery;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use spectral_core::SearchConfig;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const PROVIDER_ID: &str = "duckduckgo";
const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const REDIRECT_PREFIX: &str = "//duckduckgo.com/l/";

/// Default number of results parsed from one page.
pub const DEFAULT_MAX_RESULTS: usize = 15;

static RESULT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result").expect("valid result selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__title a").expect("valid title selector"));
static URL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__url").expect("valid url selector"));
static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__snippet").expect("valid snippet selector"));

/// Secondary tier: document search over the DuckDuckGo HTML endpoint.
pub struct DuckDuckGoProvider {
    client: Client,
    endpoint: String,
    max_results: usize,
}

impl DuckDuckGoProvider {
    /// Create a provider with the given user agent and request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Create a provider from search configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Ok(Self::new(&config.user_agent, config.timeout())?
            .with_max_results(config.secondary_max_results))
    }

    /// Limit the number of results parsed per page.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Point the provider at a different endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::ProviderFailed {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let html = response.text().await?;
        Ok(parse_results(&html, self.max_results))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &SearchQuery) -> Vec<RawHit> {
        match self.fetch(&query.text).await {
            Ok(hits) => {
                debug!(provider = PROVIDER_ID, count = hits.len(), "search completed");
                hits
            }
            Err(e) => {
                warn!(provider = PROVIDER_ID, error = %e, "search failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }
}

/// Parse a DuckDuckGo HTML results page.
///
/// Only the first `max_results` result blocks are considered. Blocks without
/// a title or an absolute `http(s)` link are dropped.
#[must_use]
pub fn parse_results(html: &str, max_results: usize) -> Vec<RawHit> {
    let document = Html::parse_document(html);

    document
        .select(&RESULT_SELECTOR)
        .take(max_results)
        .filter_map(|block| parse_block(&block))
        .collect()
}

fn parse_block(block: &ElementRef<'_>) -> Option<RawHit> {
    let title_link = block.select(&TITLE_SELECTOR).next();
    let title = title_link.map(|a| text_of(&a)).unwrap_or_default();

    let href = block
        .select(&URL_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .or_else(|| title_link.and_then(|a| a.value().attr("href")))?;

    let link = unwrap_redirect(href);
    if title.is_empty() || !link.starts_with("http") {
        return None;
    }

    let snippet = block
        .select(&SNIPPET_SELECTOR)
        .next()
        .map(|el| text_of(&el))
        .unwrap_or_default();

    RawHit::new(title, link, snippet)
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolve `//duckduckgo.com/l/?uddg=<target>` redirect links to their target.
///
/// Other links are returned unchanged.
#[must_use]
pub fn unwrap_redirect(href: &str) -> String {
    if !href.starts_with(REDIRECT_PREFIX) {
        return href.to_string();
    }

    Url::parse(&format!("https:{href}"))
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, target)| target.into_owned())
        })
        .unwrap_or_else(|| href.to_string())
}
