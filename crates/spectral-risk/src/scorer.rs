//! Weighted risk scoring.
//!
//! The score is the sum of per-site weights capped at 100. There is no decay
//! or recency term; two scans with the same exposures always score the same.

use crate::assessment::{ExposureStats, Grade, RiskAssessment};
use crate::exposure::Exposure;
use spectral_broker::{BrokerRegistry, RemovalDifficulty, Severity};
use std::collections::BTreeSet;
use tracing::debug;

/// Weight of an exposure on a site the registry does not know.
pub const DEFAULT_SITE_WEIGHT: u32 = 10;

/// Score cap.
pub const MAX_SCORE: u32 = 100;

/// Summary for a scan with no exposures.
pub const CLEAN_SUMMARY: &str =
    "Excellent! No significant data exposure found on major data broker sites.";

/// Recommendations for a scan with no exposures.
pub const CLEAN_RECOMMENDATIONS: [&str; 3] = [
    "Continue monitoring your digital footprint regularly",
    "Set up Google Alerts for your name",
    "Review privacy settings on social media accounts",
];

/// Prefix of the recommendation listing critical-risk sites.
pub const CRITICAL_PRIORITY_PREFIX: &str = "Priority: Remove your data from critical-risk sites";

/// Prefix of the recommendation listing easy removals.
pub const EASY_REMOVAL_PREFIX: &str = "Start with easy removals";

/// Recommendation for exposures on social networks.
pub const SOCIAL_PRIVACY_TIP: &str =
    "Review privacy settings on your social media profiles to limit public visibility";

/// Always-on email tip.
pub const EMAIL_ALIAS_TIP: &str =
    "Consider using email aliases for online signups to prevent future data broker listings";

/// Always-on address tip.
pub const PO_BOX_TIP: &str =
    "Use a PO Box or virtual mailbox instead of your home address when possible";

/// Recommendation once the exposure count reaches [`RECURRING_SCAN_THRESHOLD`].
pub const RECURRING_SCAN_TIP: &str = "Set up recurring monthly scans to monitor for new exposures";

/// Exposure count from which recurring scans are recommended.
pub const RECURRING_SCAN_THRESHOLD: usize = 5;

/// Turns a set of exposures into a [`RiskAssessment`].
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    registry: BrokerRegistry,
}

impl RiskScorer {
    /// Create a scorer that weighs exposures with `registry`.
    #[must_use]
    pub fn new(registry: BrokerRegistry) -> Self {
        Self { registry }
    }

    /// Score a scan's exposures.
    #[must_use]
    pub fn score(&self, mut exposures: Vec<Exposure>) -> RiskAssessment {
        if exposures.is_empty() {
            return clean_assessment();
        }

        // Registry weights are unbounded, so the sum saturates.
        let raw = exposures
            .iter()
            .map(|exposure| self.weight_of(exposure))
            .fold(0u32, u32::saturating_add);
        let score = raw.min(MAX_SCORE);
        let grade = Grade::from_score(score);

        let stats = ExposureStats::from_exposures(&exposures);
        let summary = summarize(score, &stats);
        let recommendations = recommend(&exposures, &stats);

        // Stable: equal severities keep discovery order.
        exposures.sort_by_key(|exposure| exposure.severity.rank());

        debug!(raw, score, %grade, total = stats.total_exposures, "scored exposures");

        RiskAssessment {
            score,
            grade,
            summary,
            exposures,
            recommendations,
            stats,
        }
    }

    fn weight_of(&self, exposure: &Exposure) -> u32 {
        self.registry
            .lookup(&exposure.url)
            .map_or(DEFAULT_SITE_WEIGHT, |info| info.weight)
    }
}

fn clean_assessment() -> RiskAssessment {
    RiskAssessment {
        score: 0,
        grade: Grade::A,
        summary: CLEAN_SUMMARY.to_string(),
        exposures: Vec::new(),
        recommendations: CLEAN_RECOMMENDATIONS.iter().map(ToString::to_string).collect(),
        stats: ExposureStats::default(),
    }
}

fn summarize(score: u32, stats: &ExposureStats) -> String {
    let total = stats.total_exposures;

    if score >= 75 {
        format!(
            "Critical exposure level. Your personal information is widely available on {total} \
             data broker sites, including {} critical-risk sources.",
            stats.critical_count
        )
    } else if score >= 50 {
        format!(
            "High exposure level. Your data appears on {total} sites. Immediate action \
             recommended to reduce your digital footprint."
        )
    } else if score >= 25 {
        format!(
            "Moderate exposure level. Found {total} instances of your data online. Consider \
             removing from high-risk sources."
        )
    } else {
        format!(
            "Low exposure level. Limited data found on {total} sites. Good digital hygiene \
             practices detected."
        )
    }
}

fn recommend(exposures: &[Exposure], stats: &ExposureStats) -> Vec<String> {
    let mut recommendations = Vec::new();

    if stats.critical_count > 0 {
        let sites = site_names(exposures, |e| e.severity == Severity::Critical);
        recommendations.push(format!("{CRITICAL_PRIORITY_PREFIX} like {sites} first"));
    }

    if exposures
        .iter()
        .any(|e| e.removal_difficulty == RemovalDifficulty::Easy)
    {
        let sites = site_names(exposures, |e| {
            e.removal_difficulty == RemovalDifficulty::Easy
        });
        recommendations.push(format!(
            "{EASY_REMOVAL_PREFIX}: {sites} have simple opt-out processes"
        ));
    }

    if exposures.iter().any(Exposure::is_social) {
        recommendations.push(SOCIAL_PRIVACY_TIP.to_string());
    }

    recommendations.push(EMAIL_ALIAS_TIP.to_string());
    recommendations.push(PO_BOX_TIP.to_string());

    if stats.total_exposures >= RECURRING_SCAN_THRESHOLD {
        recommendations.push(RECURRING_SCAN_TIP.to_string());
    }

    recommendations
}

/// Unique site names matching `filter`, sorted and comma-joined.
fn site_names(exposures: &[Exposure], filter: impl Fn(&Exposure) -> bool) -> String {
    exposures
        .iter()
        .filter(|e| filter(e))
        .map(|e| e.site_name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}
