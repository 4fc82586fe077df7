//! Plain-text output.

use spectral_broker::BrokerRegistry;
use spectral_risk::RiskAssessment;
use spectral_scanner::{DataSource, ScanReport};
use std::fmt::Write;

/// Human-readable scan report.
pub fn report(report: &ScanReport) -> String {
    let mut out = String::new();
    let assessment = &report.assessment;

    let _ = writeln!(out, "Exposure report for {}", report.searched_for.name);
    let _ = writeln!(out, "Scan {} at {}", report.scan_id, report.timestamp.to_rfc3339());
    let _ = writeln!(out, "Source: {}", source_label(report.data_source));
    if report.cancelled {
        let _ = writeln!(out, "Scan was interrupted; results are partial.");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Risk score: {}/100 (grade {})", assessment.score, assessment.grade);
    let _ = writeln!(out, "{}", assessment.summary);
    let _ = writeln!(out);

    write_exposures(&mut out, assessment);

    let _ = writeln!(out, "Recommendations:");
    for (i, rec) in assessment.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {rec}", i + 1);
    }

    out
}

fn write_exposures(out: &mut String, assessment: &RiskAssessment) {
    let stats = &assessment.stats;
    let _ = writeln!(
        out,
        "Exposures: {} (critical {}, high {}, medium {}, low {})",
        stats.total_exposures,
        stats.critical_count,
        stats.high_count,
        stats.medium_count,
        stats.low_count
    );

    for exposure in &assessment.exposures {
        let categories: Vec<_> = exposure.data_found.iter().map(|c| c.tag()).collect();
        let _ = writeln!(
            out,
            "  [{:<8}] {} - {}",
            exposure.severity.as_str(),
            exposure.site_name,
            exposure.url
        );
        let _ = writeln!(
            out,
            "             data: {}; removal: {}",
            categories.join(", "),
            exposure.removal_difficulty
        );
    }
    let _ = writeln!(out);
}

fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::Live => "live search",
        DataSource::Degraded => "fallback search (degraded)",
        DataSource::Synthetic => "synthetic results (no live data available)",
        DataSource::Unavailable => "no data",
    }
}

/// Human-readable registry listing.
pub fn brokers(registry: &BrokerRegistry) -> String {
    let mut out = String::new();

    for info in registry.all() {
        let _ = writeln!(
            out,
            "{:<22} {:<20} {:<8} {:<6} weight {:>2}  {}",
            info.domain,
            info.category.display_name(),
            info.severity.as_str(),
            info.removal_difficulty.as_str(),
            info.weight,
            info.removal_url
        );
    }
    let _ = writeln!(out, "{} brokers", registry.count());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectral_scanner::{
        ExposureScanner, FallbackOrchestrator, QueryPlanner, Subject, SyntheticProvider,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_report_lists_exposures_and_recommendations() {
        let scanner = ExposureScanner::new(
            BrokerRegistry::builtin(),
            QueryPlanner::new(Vec::new(), 3),
            FallbackOrchestrator::new(Duration::from_secs(1))
                .with_synthetic(Arc::new(SyntheticProvider::new())),
        );
        let scan = scanner
            .scan(
                Subject::named("Jane Smith").expect("valid"),
                &CancellationToken::new(),
            )
            .await;

        let text = report(&scan);

        assert!(text.starts_with("Exposure report for Jane Smith\n"));
        assert!(text.contains("Source: synthetic results"));
        assert!(text.contains("Risk score: 100/100 (grade F)"));
        assert!(text.contains("Exposures: 10 (critical 4, high 6, medium 0, low 0)"));
        assert!(text.contains("] MyLife - https://www.mylife.com/Jane-Smith"));
        assert!(text.contains("  1. Priority: Remove your data from critical-risk sites"));
        assert!(!text.contains("interrupted"));
    }

    #[test]
    fn test_brokers_listing() {
        let text = brokers(&BrokerRegistry::builtin());
        assert!(text.lines().next().expect("first line").starts_with("spokeo.com"));
        assert!(text.ends_with("12 brokers\n"));
    }
}
