//! Immutable broker registry with domain lookup and query support.

use crate::{
    builtin::builtin_brokers,
    definition::{BrokerCategory, BrokerInfo, RemovalDifficulty, Severity},
    domain::normalize_host,
    error::{BrokerError, Result},
    loader::BrokerLoader,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Read-only table of known data-broker sites.
///
/// The registry is built once at start-up and injected wherever lookups are
/// needed. Cloning is cheap; all clones share the same entries, and entries
/// keep their load order because lookups return the first match.
#[derive(Debug, Clone)]
pub struct BrokerRegistry {
    entries: Arc<[BrokerInfo]>,
}

impl BrokerRegistry {
    /// Create a registry from the built-in broker table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: builtin_brokers().into(),
        }
    }

    /// Create an empty registry. Every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new().into(),
        }
    }

    /// Create a registry from explicit entries.
    ///
    /// # Errors
    /// Returns error if an entry is invalid or two entries share a domain.
    pub fn from_entries(entries: Vec<BrokerInfo>) -> Result<Self> {
        let mut seen = HashSet::new();

        for entry in &entries {
            entry.validate()?;
            if !seen.insert(entry.domain.as_str()) {
                return Err(BrokerError::DuplicateDomain {
                    domain: entry.domain.clone(),
                });
            }
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Create a registry from every entry the loader can find.
    ///
    /// # Errors
    /// Returns error if loading fails or the loaded entries are inconsistent.
    pub fn load_from(loader: &BrokerLoader) -> Result<Self> {
        let registry = Self::from_entries(loader.load_all()?)?;
        info!(count = registry.count(), "loaded broker registry");
        Ok(registry)
    }

    /// Find the broker hosting `url`.
    ///
    /// The hostname is lowercased and stripped of a leading `www.`; the first
    /// entry whose domain is contained in it wins. Malformed URLs miss.
    #[must_use]
    pub fn lookup(&self, url: &str) -> Option<&BrokerInfo> {
        let host = normalize_host(url)?;
        self.lookup_host(&host)
    }

    /// Find the broker for an already-normalized hostname.
    #[must_use]
    pub fn lookup_host(&self, host: &str) -> Option<&BrokerInfo> {
        let found = self.entries.iter().find(|info| info.matches_host(host));

        if let Some(info) = found {
            debug!(host, broker = %info.name, "matched broker");
        }

        found
    }

    /// Get a broker entry by its exact domain.
    ///
    /// # Errors
    /// Returns error if no entry has this domain.
    pub fn get(&self, domain: &str) -> Result<&BrokerInfo> {
        self.entries
            .iter()
            .find(|info| info.domain == domain)
            .ok_or_else(|| BrokerError::NotFound {
                domain: domain.to_string(),
            })
    }

    /// Get all broker entries in registry order.
    #[must_use]
    pub fn all(&self) -> &[BrokerInfo] {
        &self.entries
    }

    /// Get every registered domain in registry order.
    #[must_use]
    pub fn domains(&self) -> Vec<&str> {
        self.entries.iter().map(|info| info.domain.as_str()).collect()
    }

    /// Query brokers by category.
    #[must_use]
    pub fn get_by_category(&self, category: BrokerCategory) -> Vec<&BrokerInfo> {
        self.entries
            .iter()
            .filter(|info| info.category == category)
            .collect()
    }

    /// Query brokers by severity.
    #[must_use]
    pub fn get_by_severity(&self, severity: Severity) -> Vec<&BrokerInfo> {
        self.entries
            .iter()
            .filter(|info| info.severity == severity)
            .collect()
    }

    /// Query brokers by removal difficulty.
    #[must_use]
    pub fn get_by_difficulty(&self, difficulty: RemovalDifficulty) -> Vec<&BrokerInfo> {
        self.entries
            .iter()
            .filter(|info| info.removal_difficulty == difficulty)
            .collect()
    }

    /// Get the total number of brokers in the registry.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Get broker count by category.
    #[must_use]
    pub fn count_by_category(&self) -> HashMap<BrokerCategory, usize> {
        let mut counts: HashMap<BrokerCategory, usize> = HashMap::new();

        for info in self.entries.iter() {
            *counts.entry(info.category).or_insert(0) += 1;
        }

        counts
    }
}

impl Default for BrokerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
