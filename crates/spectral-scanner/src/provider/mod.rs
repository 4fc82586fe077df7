//! Search provider trait and implementations.

pub mod duckduckgo;
pub mod google;
pub mod synthetic;

pub use duckduckgo::DuckDuckGoProvider;
pub use google::GoogleSearchProvider;
pub use synthetic::SyntheticProvider;

use crate::hit::RawHit;
use crate::query::SearchQuery;
use async_trait::async_trait;

/// A search backend.
///
/// Implementations must not fail on recoverable errors: transport failures,
/// non-2xx responses, empty payloads and unparseable bodies are logged and
/// reported as an empty list. Configuration problems are reported when the
/// provider is constructed instead.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query and return its hits in result order.
    async fn search(&self, query: &SearchQuery) -> Vec<RawHit>;

    /// Get the unique identifier for this provider.
    fn provider_id(&self) -> &str;
}
