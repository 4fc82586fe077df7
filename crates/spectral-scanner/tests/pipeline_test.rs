//! End-to-end scans with fake search providers.

use async_trait::async_trait;
use spectral_broker::BrokerRegistry;
use spectral_risk::scorer::CRITICAL_PRIORITY_PREFIX;
use spectral_risk::Grade;
use spectral_scanner::{
    DataSource, ExposureScanner, FallbackOrchestrator, QueryPlanner, RawHit, SearchProvider,
    SearchQuery, SearchTier, Subject, SyntheticProvider,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Provider returning the same links for every query and counting calls.
struct FakeProvider {
    links: Vec<(String, String)>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn new(links: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            links: links
                .iter()
                .map(|(link, snippet)| ((*link).to_string(), (*snippet).to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn empty() -> Arc<Self> {
        Self::new(&[])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock").clone()
    }
}

#[async_trait]
impl SearchProvider for FakeProvider {
    async fn search(&self, query: &SearchQuery) -> Vec<RawHit> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .expect("queries lock")
            .push(query.text.clone());

        self.links
            .iter()
            .filter_map(|(link, snippet)| RawHit::new("result", link.as_str(), snippet.as_str()))
            .collect()
    }

    fn provider_id(&self) -> &'static str {
        "fake"
    }
}

struct Tiers {
    primary: Arc<FakeProvider>,
    secondary: Arc<FakeProvider>,
    synthetic: Arc<FakeProvider>,
}

fn scanner_with(tiers: &Tiers) -> ExposureScanner {
    let registry = BrokerRegistry::builtin();
    let orchestrator = FallbackOrchestrator::new(Duration::from_secs(5))
        .with_primary(tiers.primary.clone())
        .with_secondary(tiers.secondary.clone())
        .with_synthetic(tiers.synthetic.clone());
    let planner = QueryPlanner::new(
        registry.domains().into_iter().map(String::from).collect(),
        3,
    );

    ExposureScanner::new(registry, planner, orchestrator)
}

fn synthetic_scanner() -> ExposureScanner {
    let registry = BrokerRegistry::builtin();
    let orchestrator = FallbackOrchestrator::new(Duration::from_secs(5))
        .with_primary(FakeProvider::empty())
        .with_secondary(FakeProvider::empty())
        .with_synthetic(Arc::new(SyntheticProvider::new()));
    let planner = QueryPlanner::new(Vec::new(), 3);

    ExposureScanner::new(registry, planner, orchestrator)
}

#[tokio::test]
async fn test_primary_hits_skip_fallback_tiers() {
    let tiers = Tiers {
        primary: FakeProvider::new(&[
            ("https://www.spokeo.com/Jane-Smith", ""),
            ("https://www.mylife.com/jane-smith", ""),
        ]),
        secondary: FakeProvider::new(&[("https://www.radaris.com/p/Jane", "")]),
        synthetic: FakeProvider::new(&[("https://www.intelius.com/x", "")]),
    };
    let scanner = scanner_with(&tiers);

    let subject = Subject::named("Jane Smith").expect("valid");
    let report = scanner.scan(subject, &CancellationToken::new()).await;

    // One variant for a name-only subject, and both hits come back once.
    assert_eq!(tiers.primary.calls(), 1);
    assert_eq!(tiers.secondary.calls(), 0);
    assert_eq!(tiers.synthetic.calls(), 0);
    assert_eq!(report.data_source, DataSource::Live);
    assert_eq!(report.assessment.exposures.len(), 2);
    assert_eq!(report.assessment.score, 15 + 22);
}

#[tokio::test]
async fn test_secondary_used_when_primary_empty() {
    let tiers = Tiers {
        primary: FakeProvider::empty(),
        secondary: FakeProvider::new(&[
            ("https://www.whitepages.com/name/Jane-Smith", ""),
            ("https://www.fastpeoplesearch.com/name/jane-smith", ""),
            ("https://www.unknown-directory.example/jane", "Jane Smith, phone on file"),
        ]),
        synthetic: FakeProvider::new(&[("https://www.intelius.com/x", "")]),
    };
    let scanner = scanner_with(&tiers);

    let subject = Subject::new(
        "Jane Smith",
        Some("Austin, TX"),
        Some("jane@example.com"),
        Some("512-555-0199"),
    )
    .expect("valid");
    let report = scanner.scan(subject, &CancellationToken::new()).await;

    assert_eq!(tiers.primary.calls(), 3);
    assert_eq!(tiers.secondary.calls(), 1);
    assert_eq!(tiers.synthetic.calls(), 0);
    assert_eq!(report.data_source, DataSource::Degraded);
    assert_eq!(report.assessment.exposures.len(), 3);
    assert_eq!(report.assessment.score, 15 + 12 + 10);

    let attempted: Vec<_> = report.tiers_attempted.iter().map(|a| a.tier).collect();
    assert_eq!(attempted, vec![SearchTier::Primary, SearchTier::Secondary]);

    // The secondary tier reuses the first primary variant.
    assert_eq!(tiers.secondary.queries(), vec![tiers.primary.queries()[0].clone()]);
    assert!(tiers.secondary.queries()[0].starts_with("\"Jane Smith\" (site:spokeo.com OR "));
}

#[tokio::test]
async fn test_duplicate_links_across_variants_collapse() {
    let tiers = Tiers {
        primary: FakeProvider::new(&[
            ("https://www.spokeo.com/Jane-Smith", ""),
            ("HTTPS://WWW.SPOKEO.COM/JANE-SMITH", ""),
        ]),
        secondary: FakeProvider::empty(),
        synthetic: FakeProvider::empty(),
    };
    let scanner = scanner_with(&tiers);

    let subject = Subject::new("Jane Smith", Some("Austin, TX"), None, None).expect("valid");
    let report = scanner.scan(subject, &CancellationToken::new()).await;

    // Two variants times two hits, all the same URL.
    assert_eq!(tiers.primary.calls(), 2);
    assert_eq!(report.tiers_attempted[0].hits, 4);
    assert_eq!(report.raw_results.len(), 1);
    assert_eq!(report.raw_results[0].link, "https://www.spokeo.com/Jane-Smith");
    assert_eq!(report.assessment.stats.total_exposures, 1);
}

#[tokio::test]
async fn test_synthetic_end_to_end() {
    let scanner = synthetic_scanner();

    let assessment = scanner
        .assess("Jane Smith", None, None, None)
        .await
        .expect("valid subject");

    assert_eq!(assessment.exposures.len(), 10);
    assert_eq!(assessment.score, 100);
    assert_eq!(assessment.grade, Grade::F);
    assert!(assessment.recommendations[0].starts_with(CRITICAL_PRIORITY_PREFIX));
    assert_eq!(assessment.stats.critical_count, 4);
    assert!(assessment.summary.starts_with("Critical exposure level."));
}

#[tokio::test]
async fn test_synthetic_with_email_and_blank_optionals() {
    let scanner = synthetic_scanner();

    let assessment = scanner
        .assess("Jane Smith", Some(""), Some("jane@example.com"), Some("   "))
        .await
        .expect("valid subject");

    assert_eq!(assessment.exposures.len(), 11);
    assert_eq!(assessment.grade, Grade::F);
}

#[tokio::test]
async fn test_synthetic_scan_is_deterministic() {
    let scanner = synthetic_scanner();

    let first = scanner.assess("Jane Smith", Some("Austin, TX"), None, None).await;
    let second = scanner.assess("Jane Smith", Some("Austin, TX"), None, None).await;
    assert_eq!(first.expect("first"), second.expect("second"));
}

#[tokio::test]
async fn test_cancelled_scan_is_scored_empty() {
    let tiers = Tiers {
        primary: FakeProvider::new(&[("https://www.spokeo.com/Jane-Smith", "")]),
        secondary: FakeProvider::empty(),
        synthetic: FakeProvider::empty(),
    };
    let scanner = scanner_with(&tiers);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let report = scanner
        .scan(Subject::named("Jane Smith").expect("valid"), &cancel)
        .await;

    assert!(report.cancelled);
    assert_eq!(report.data_source, DataSource::Unavailable);
    assert_eq!(tiers.primary.calls(), 0);
    assert_eq!(report.assessment.score, 0);
    assert_eq!(report.assessment.grade, Grade::A);
}

#[tokio::test]
async fn test_report_serialization() {
    let scanner = synthetic_scanner();
    let report = scanner
        .scan(
            Subject::new("Jane Smith", Some("Austin, TX"), None, None).expect("valid"),
            &CancellationToken::new(),
        )
        .await;

    let json = serde_json::to_value(&report).expect("serialize report");

    assert_eq!(json["dataSource"], "synthetic");
    assert_eq!(json["searchedFor"]["name"], "Jane Smith");
    assert_eq!(json["searchedFor"]["cityState"], "Austin, TX");
    assert_eq!(json["cancelled"], false);
    assert_eq!(json["tiersAttempted"][2]["tier"], "synthetic");
    assert_eq!(json["rawResults"].as_array().map(Vec::len), Some(10));
    assert_eq!(json["assessment"]["grade"], "F");
    assert_eq!(json["assessment"]["stats"]["totalExposures"], 10);
    assert!(json["timestamp"].as_str().is_some());
    assert!(json["scanId"].as_str().is_some());
}
