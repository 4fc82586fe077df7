//! The enriched exposure record and its removal guidance.

use serde::{Deserialize, Serialize};
use spectral_broker::{BrokerInfo, RemovalDifficulty, Severity};
use spectral_core::DataCategory;

/// Removal guidance for sites that are not in the broker registry.
pub const GENERIC_REMOVAL_INSTRUCTIONS: &str = "Visit the site and look for a privacy policy or \
     opt-out page. Most sites are required to honor removal requests under CCPA and GDPR.";

/// One confirmed appearance of the subject's data on a specific site.
///
/// Built once per unique URL per scan and never modified afterwards. Status
/// tracking (new, processing, removed) belongs to whoever persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exposure {
    /// Hostname the hit was found on, without `www.`
    pub site: String,
    /// Registry display name, or the hostname for unknown sites
    pub site_name: String,
    /// Listing URL
    pub url: String,
    /// Exposed data categories; never empty
    pub data_found: Vec<DataCategory>,
    /// Risk severity of the source site
    pub severity: Severity,
    /// How hard it is to get the listing removed
    pub removal_difficulty: RemovalDifficulty,
    /// Opt-out page, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal_url: Option<String>,
    /// Human-readable removal guidance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal_instructions: Option<String>,
    /// Search snippet the hit was found with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Exposure {
    /// Build an exposure on a known broker site.
    #[must_use]
    pub fn from_broker(
        site: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        broker: &BrokerInfo,
    ) -> Self {
        Self {
            site: site.into(),
            site_name: broker.name.clone(),
            url: url.into(),
            data_found: non_empty(broker.data_types.clone()),
            severity: broker.severity,
            removal_difficulty: broker.removal_difficulty,
            removal_url: Some(broker.removal_url.clone()),
            removal_instructions: Some(removal_instructions(Some(broker))),
            snippet: Some(snippet.into()),
        }
    }

    /// Build an exposure on a site the registry does not know.
    ///
    /// Severity and removal difficulty default to medium.
    #[must_use]
    pub fn unrecognized(
        site: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        data_found: Vec<DataCategory>,
    ) -> Self {
        let site = site.into();

        Self {
            site_name: site.clone(),
            site,
            url: url.into(),
            data_found: non_empty(data_found),
            severity: Severity::Medium,
            removal_difficulty: RemovalDifficulty::Medium,
            removal_url: None,
            removal_instructions: Some(GENERIC_REMOVAL_INSTRUCTIONS.to_string()),
            snippet: Some(snippet.into()),
        }
    }

    /// Whether the exposure is on a social network.
    #[must_use]
    pub fn is_social(&self) -> bool {
        self.site.contains("linkedin") || self.site.contains("facebook")
    }

    /// Prepare the hand-off to the opt-out automation subsystem.
    #[must_use]
    pub fn opt_out_request(&self, user_data: OptOutUserData) -> OptOutRequest {
        OptOutRequest {
            broker: self.site_name.clone(),
            site: self.site.clone(),
            url: self.url.clone(),
            removal_url: self.removal_url.clone(),
            user_data,
        }
    }
}

fn non_empty(mut categories: Vec<DataCategory>) -> Vec<DataCategory> {
    if categories.is_empty() {
        categories.push(DataCategory::Name);
    }
    categories
}

/// Removal guidance for a site.
///
/// Known brokers get a difficulty-specific message pointing at their opt-out
/// page; everything else gets the generic CCPA/GDPR message.
#[must_use]
pub fn removal_instructions(broker: Option<&BrokerInfo>) -> String {
    let Some(broker) = broker else {
        return GENERIC_REMOVAL_INSTRUCTIONS.to_string();
    };

    let effort = match broker.removal_difficulty {
        RemovalDifficulty::Easy => {
            "This site has a simple opt-out process that typically takes 5-10 minutes."
        }
        RemovalDifficulty::Medium => {
            "This site requires verification steps. Expect the process to take 15-30 minutes."
        }
        RemovalDifficulty::Hard => {
            "This site has a complex removal process. You may need to submit multiple requests \
             or verify your identity."
        }
    };

    format!(
        "{effort} Visit {} to begin the removal process.",
        broker.removal_url
    )
}

/// Contact fields the opt-out flow submits on the user's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptOutUserData {
    /// Full name
    pub name: String,
    /// Contact email for confirmation links
    pub email: String,
    /// Street address, when the broker asks for one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Request handed to the opt-out automation subsystem.
///
/// Submission itself is out of scope here; this only carries what the scan
/// already knows about the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptOutRequest {
    /// Broker display name the automation is keyed by
    pub broker: String,
    /// Hostname of the listing
    pub site: String,
    /// Listing URL
    pub url: String,
    /// Opt-out page, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal_url: Option<String>,
    /// User contact fields
    pub user_data: OptOutUserData,
}
