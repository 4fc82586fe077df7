//! Broker metadata types.
//!
//! This module defines the registry entry for a known data-broker site and
//! the closed enumerations describing its risk profile.

use crate::error::{BrokerError, Result};
use serde::{Deserialize, Serialize};
use spectral_core::DataCategory;
use std::fmt;

/// Registry entry for a known data-broker site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerInfo {
    /// Bare root domain without `www.` (e.g., "spokeo.com")
    pub domain: String,

    /// Human-readable broker name
    pub name: String,

    /// Broker category
    pub category: BrokerCategory,

    /// Risk severity of an exposure on this site
    pub severity: Severity,

    /// Difficulty level for removal
    pub removal_difficulty: RemovalDifficulty,

    /// Opt-out or suppression page
    pub removal_url: String,

    /// Categories of personal data the site publishes, in display order
    pub data_types: Vec<DataCategory>,

    /// Contribution of one exposure on this site to the risk score
    pub weight: u32,
}

impl BrokerInfo {
    /// Check whether this entry matches a normalized hostname.
    ///
    /// Matching is by containment so that broker subdomains resolve to the
    /// same entry as the bare domain.
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        host.contains(self.domain.as_str())
    }

    /// Validate the entry for completeness and correctness.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| BrokerError::ValidationError {
            domain: self.domain.clone(),
            reason: reason.to_string(),
        };

        if self.domain.trim().is_empty() {
            return Err(invalid("domain cannot be empty"));
        }

        if self.domain.starts_with("www.") {
            return Err(invalid("domain must not include a www. prefix"));
        }

        if self.domain.contains('/') || self.domain.contains(char::is_whitespace) {
            return Err(invalid("domain must be a bare hostname"));
        }

        // Lookups compare against lowercased hosts.
        if self.domain.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(invalid("domain must be lowercase"));
        }

        if self.name.trim().is_empty() {
            return Err(invalid("broker name cannot be empty"));
        }

        if self.removal_url.trim().is_empty() {
            return Err(invalid("removal URL cannot be empty"));
        }

        if self.data_types.is_empty() {
            return Err(invalid("at least one data type is required"));
        }

        if self.weight == 0 {
            return Err(invalid("weight must be a positive integer"));
        }

        Ok(())
    }
}

/// Categories of data brokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrokerCategory {
    /// People search engines (Spokeo, Whitepages, etc.)
    PeopleSearch,
    /// Background check services
    BackgroundCheck,
    /// Social networks
    Social,
    /// Professional networks
    SocialProfessional,
    /// Reputation and profile aggregators
    Reputation,
}

impl BrokerCategory {
    /// Get a human-readable display name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PeopleSearch => "People Search",
            Self::BackgroundCheck => "Background Check",
            Self::Social => "Social",
            Self::SocialProfessional => "Professional Network",
            Self::Reputation => "Reputation",
        }
    }
}

/// Qualitative risk level of an exposure's source site.
///
/// Ordering follows the rank: `Critical < High < Medium < Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Background checks with criminal and asset records
    Critical,
    /// People-search listings with contact details
    High,
    /// Social profiles and unrecognized sites
    Medium,
    /// Minimal exposure
    Low,
}

impl Severity {
    /// Sort rank, most severe first.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Lowercase label as used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level for removal from a broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalDifficulty {
    /// Simple web form, quick response
    Easy,
    /// Requires email verification or multiple steps
    Medium,
    /// Requires identity verification or repeated requests
    Hard,
}

impl RemovalDifficulty {
    /// Lowercase label as used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for RemovalDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
