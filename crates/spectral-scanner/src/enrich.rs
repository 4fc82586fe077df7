//! Raw hit to exposure enrichment.

use crate::hit::RawHit;
use spectral_broker::BrokerRegistry;
use spectral_risk::{classify, Exposure};
use tracing::debug;

/// Turns raw hits into exposures using the broker registry.
#[derive(Debug, Clone, Default)]
pub struct ExposureBuilder {
    registry: BrokerRegistry,
}

impl ExposureBuilder {
    /// Create a builder backed by `registry`.
    #[must_use]
    pub fn new(registry: BrokerRegistry) -> Self {
        Self { registry }
    }

    /// Build the exposure for one hit.
    ///
    /// Known brokers contribute their metadata. Unknown sites get medium
    /// defaults and categories inferred from the snippet.
    #[must_use]
    pub fn build(&self, hit: &RawHit, subject_name: &str) -> Exposure {
        match self.registry.lookup(&hit.link) {
            Some(broker) => Exposure::from_broker(&hit.source, &hit.link, &hit.snippet, broker),
            None => {
                let data_found = classify(&hit.snippet, subject_name);
                debug!(site = %hit.source, categories = data_found.len(), "classified unknown site");
                Exposure::unrecognized(&hit.source, &hit.link, &hit.snippet, data_found)
            }
        }
    }

    /// Build exposures for every hit, preserving order.
    #[must_use]
    pub fn build_all(&self, hits: &[RawHit], subject_name: &str) -> Vec<Exposure> {
        hits.iter().map(|hit| self.build(hit, subject_name)).collect()
    }
}
