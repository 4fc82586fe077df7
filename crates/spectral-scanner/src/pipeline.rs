//! End-to-end exposure scanning.

use crate::dedupe::dedupe;
use crate::enrich::ExposureBuilder;
use crate::error::{Result, ScanError};
use crate::hit::RawHit;
use crate::orchestrator::{FallbackOrchestrator, SearchTier, TierAttempt};
use crate::provider::{DuckDuckGoProvider, GoogleSearchProvider, SyntheticProvider};
use crate::query::QueryPlanner;
use crate::subject::Subject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spectral_broker::BrokerRegistry;
use spectral_core::AppConfig;
use spectral_risk::{RiskAssessment, RiskScorer};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

/// Where a scan's results came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Primary search API
    Live,
    /// Secondary document search
    Degraded,
    /// Synthetic generator
    Synthetic,
    /// No tier produced data
    Unavailable,
}

impl From<Option<SearchTier>> for DataSource {
    fn from(tier: Option<SearchTier>) -> Self {
        match tier {
            Some(SearchTier::Primary) => Self::Live,
            Some(SearchTier::Secondary) => Self::Degraded,
            Some(SearchTier::Synthetic) => Self::Synthetic,
            None => Self::Unavailable,
        }
    }
}

/// Assessment plus provenance for one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Unique scan identifier
    pub scan_id: Uuid,
    /// Subject attributes as searched
    pub searched_for: Subject,
    /// When the scan finished
    pub timestamp: DateTime<Utc>,
    /// Tier that produced the results
    pub data_source: DataSource,
    /// Every tier attempted, in order
    pub tiers_attempted: Vec<TierAttempt>,
    /// Whether the scan was cut short
    pub cancelled: bool,
    /// Scored result
    pub assessment: RiskAssessment,
    /// Deduplicated hits the assessment was built from
    pub raw_results: Vec<RawHit>,
}

/// Runs query planning, tiered search, deduplication, enrichment and
/// scoring for a subject.
pub struct ExposureScanner {
    planner: QueryPlanner,
    orchestrator: FallbackOrchestrator,
    builder: ExposureBuilder,
    scorer: RiskScorer,
}

impl ExposureScanner {
    /// Create a scanner from explicit parts.
    #[must_use]
    pub fn new(
        registry: BrokerRegistry,
        planner: QueryPlanner,
        orchestrator: FallbackOrchestrator,
    ) -> Self {
        Self {
            planner,
            orchestrator,
            builder: ExposureBuilder::new(registry.clone()),
            scorer: RiskScorer::new(registry),
        }
    }

    /// Create a scanner with the real providers enabled by `config`.
    ///
    /// The primary tier is left out when its credentials are missing, and the
    /// synthetic tier when `search.synthetic_fallback` is off.
    ///
    /// # Errors
    /// Returns error if an HTTP client cannot be created.
    pub fn from_config(config: &AppConfig, registry: BrokerRegistry) -> Result<Self> {
        let search = &config.search;
        let mut orchestrator = FallbackOrchestrator::new(search.timeout())
            .with_concurrent_variants(search.concurrent_variants)
            .with_secondary(Arc::new(DuckDuckGoProvider::from_config(search)?));

        match GoogleSearchProvider::from_config(search) {
            Ok(provider) => orchestrator = orchestrator.with_primary(Arc::new(provider)),
            Err(ScanError::ProviderDisabled { provider, reason }) => {
                info!(%provider, %reason, "primary search tier disabled");
            }
            Err(e) => return Err(e),
        }

        if search.synthetic_fallback {
            orchestrator = orchestrator.with_synthetic(Arc::new(SyntheticProvider::new()));
        }

        let planner = QueryPlanner::from_config(search, &registry);
        Ok(Self::new(registry, planner, orchestrator))
    }

    /// Validate the subject attributes and return its risk assessment.
    ///
    /// Empty optional strings are treated as absent.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidInput`] if the name is empty; no provider
    /// is called in that case.
    pub async fn assess(
        &self,
        name: &str,
        city_state: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<RiskAssessment> {
        let subject = Subject::new(name, city_state, email, phone)?;
        let report = self.scan(subject, &CancellationToken::new()).await;
        Ok(report.assessment)
    }

    /// Run a full scan for an already-validated subject.
    ///
    /// Cancellation stops further provider calls; whatever was collected is
    /// still scored.
    pub async fn scan(&self, subject: Subject, cancel: &CancellationToken) -> ScanReport {
        let scan_id = Uuid::new_v4();
        info!(%scan_id, "starting exposure scan");

        let plan = self.planner.plan(&subject);
        let outcome = self.orchestrator.run(&plan, cancel).await;

        let raw_results = dedupe(outcome.hits);
        debug!(%scan_id, unique = raw_results.len(), "deduplicated hits");

        let exposures = self.builder.build_all(&raw_results, &subject.name);
        let assessment = self.scorer.score(exposures);
        let data_source = DataSource::from(outcome.tier);

        info!(
            %scan_id,
            source = ?data_source,
            exposures = assessment.stats.total_exposures,
            score = assessment.score,
            grade = %assessment.grade,
            cancelled = outcome.cancelled,
            "exposure scan complete"
        );

        ScanReport {
            scan_id,
            searched_for: subject,
            timestamp: Utc::now(),
            data_source,
            tiers_attempted: outcome.attempts,
            cancelled: outcome.cancelled,
            assessment,
            raw_results,
        }
    }
}
