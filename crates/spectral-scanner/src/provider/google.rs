//! Google Custom Search JSON API provider.

use super::SearchProvider;
use crate::error::{Result, ScanError};
use crate::hit::RawHit;
use crate::query::SearchQuery;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use spectral_core::SearchConfig;
use std::time::Duration;
use tracing::{debug, warn};

const PROVIDER_ID: &str = "google";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Primary tier: structured web search restricted by `site:` filters.
pub struct GoogleSearchProvider {
    api_key: String,
    cx: String,
    client: Client,
    base_url: String,
}

impl GoogleSearchProvider {
    /// Create a provider with explicit credentials.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        api_key: impl Into<String>,
        cx: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key: api_key.into(),
            cx: cx.into(),
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a provider from search configuration.
    ///
    /// # Errors
    /// Returns [`ScanError::ProviderDisabled`] when credentials are missing or
    /// still hold placeholder values.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let (api_key, cx) =
            config
                .google_credentials()
                .ok_or_else(|| ScanError::ProviderDisabled {
                    provider: PROVIDER_ID.to_string(),
                    reason: "missing or placeholder API credentials".to_string(),
                })?;

        Self::new(api_key, cx, config.timeout())
    }

    /// Point the provider at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawHit>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::ProviderFailed {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let body: GoogleResponse =
            response
                .json()
                .await
                .map_err(|e| ScanError::ProviderFailed {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("failed to parse response: {e}"),
                })?;

        Ok(body.into_hits())
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
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

// Custom Search API types

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleResponse {
    fn into_hits(self) -> Vec<RawHit> {
        self.items
            .into_iter()
            .filter_map(|item| RawHit::new(item.title, item.link, item.snippet))
            .collect()
    }
}
