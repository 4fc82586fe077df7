//! Tiered search with fallback.
//!
//! Tiers run strictly in order: primary, secondary, synthetic. The first tier
//! that produces at least one hit ends the search. There are no retries; a
//! tier that fails, times out or is not configured simply counts as empty.

use crate::hit::RawHit;
use crate::provider::SearchProvider;
use crate::query::{QueryPlan, SearchQuery};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A search tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTier {
    /// Structured search API
    Primary,
    /// Document search fallback
    Secondary,
    /// Deterministic synthetic generator
    Synthetic,
}

impl SearchTier {
    /// The tier to try when this one comes back empty.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Primary => Some(Self::Secondary),
            Self::Secondary => Some(Self::Synthetic),
            Self::Synthetic => None,
        }
    }

    /// Get the string identifier for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for SearchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one tier attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAttempt {
    /// Tier that was attempted
    pub tier: SearchTier,
    /// Provider that served it, if one was configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Queries issued
    pub queries: usize,
    /// Hits returned across all queries
    pub hits: usize,
}

/// Result of running the fallback chain.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Hits from the winning tier, in query order then result order
    pub hits: Vec<RawHit>,
    /// Tier that produced the hits
    pub tier: Option<SearchTier>,
    /// Every tier attempted, in order
    pub attempts: Vec<TierAttempt>,
    /// Whether the search stopped because of cancellation
    pub cancelled: bool,
}

/// Runs the primary, secondary and synthetic tiers in order.
pub struct FallbackOrchestrator {
    primary: Option<Arc<dyn SearchProvider>>,
    secondary: Option<Arc<dyn SearchProvider>>,
    synthetic: Option<Arc<dyn SearchProvider>>,
    timeout: Duration,
    concurrent_variants: bool,
}

impl FallbackOrchestrator {
    /// Create an orchestrator with no providers configured.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            primary: None,
            secondary: None,
            synthetic: None,
            timeout,
            concurrent_variants: true,
        }
    }

    /// Set the primary tier provider.
    #[must_use]
    pub fn with_primary(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.primary = Some(provider);
        self
    }

    /// Set the secondary tier provider.
    #[must_use]
    pub fn with_secondary(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.secondary = Some(provider);
        self
    }

    /// Set the synthetic tier provider.
    #[must_use]
    pub fn with_synthetic(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.synthetic = Some(provider);
        self
    }

    /// Issue primary variants concurrently (default) or one after another.
    #[must_use]
    pub fn with_concurrent_variants(mut self, concurrent: bool) -> Self {
        self.concurrent_variants = concurrent;
        self
    }

    /// Run the fallback chain for a query plan.
    ///
    /// Once `cancel` fires no further provider calls are issued and whatever
    /// was collected so far is returned.
    pub async fn run(&self, plan: &QueryPlan, cancel: &CancellationToken) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        let mut state = Some(SearchTier::Primary);

        while let Some(tier) = state {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }

            let (provider, queries) = match tier {
                SearchTier::Primary => (self.primary.as_ref(), plan.primary.as_slice()),
                SearchTier::Secondary => {
                    (self.secondary.as_ref(), std::slice::from_ref(&plan.fallback))
                }
                SearchTier::Synthetic => {
                    (self.synthetic.as_ref(), std::slice::from_ref(&plan.fallback))
                }
            };

            let Some(provider) = provider else {
                debug!(%tier, "tier not configured, skipping");
                outcome.attempts.push(TierAttempt {
                    tier,
                    provider: None,
                    queries: 0,
                    hits: 0,
                });
                state = tier.next();
                continue;
            };

            debug!(
                %tier,
                provider = provider.provider_id(),
                queries = queries.len(),
                "attempting tier"
            );

            let (hits, issued, cancelled) = self.run_tier(tier, provider, queries, cancel).await;

            outcome.attempts.push(TierAttempt {
                tier,
                provider: Some(provider.provider_id().to_string()),
                queries: issued,
                hits: hits.len(),
            });

            if !hits.is_empty() {
                info!(%tier, count = hits.len(), "search tier produced results");
                outcome.hits = hits;
                outcome.tier = Some(tier);
            }

            if cancelled {
                outcome.cancelled = true;
                break;
            }

            if outcome.tier.is_some() {
                break;
            }

            debug!(%tier, "tier returned no results, falling back");
            state = tier.next();
        }

        if outcome.cancelled {
            info!(collected = outcome.hits.len(), "search cancelled");
        }

        outcome
    }

    /// Run every query of a tier. Returns hits, queries issued and whether
    /// cancellation interrupted the tier.
    async fn run_tier(
        &self,
        tier: SearchTier,
        provider: &Arc<dyn SearchProvider>,
        queries: &[SearchQuery],
        cancel: &CancellationToken,
    ) -> (Vec<RawHit>, usize, bool) {
        if tier == SearchTier::Primary && self.concurrent_variants {
            // Each variant races the token on its own so finished variants
            // keep their hits when a slower one is cut short.
            let results = join_all(queries.iter().map(|query| async move {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => None,
                    found = self.call(provider, query) => Some(found),
                }
            }))
            .await;

            let cancelled = results.iter().any(Option::is_none);
            let hits = results.into_iter().flatten().flatten().collect();
            return (hits, queries.len(), cancelled);
        }

        let mut hits = Vec::new();

        for (issued, query) in queries.iter().enumerate() {
            if cancel.is_cancelled() {
                return (hits, issued, true);
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => return (hits, issued + 1, true),
                found = self.call(provider, query) => hits.extend(found),
            }
        }

        (hits, queries.len(), false)
    }

    /// One provider call bounded by the configured timeout.
    async fn call(&self, provider: &Arc<dyn SearchProvider>, query: &SearchQuery) -> Vec<RawHit> {
        match tokio::time::timeout(self.timeout, provider.search(query)).await {
            Ok(hits) => hits,
            Err(_) => {
                warn!(
                    provider = provider.provider_id(),
                    timeout_secs = self.timeout.as_secs(),
                    "provider call timed out, treating as empty"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Subject;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProvider {
        hits: Vec<RawHit>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl FixedProvider {
        fn returning(count: usize) -> Arc<Self> {
            Self::slow(count, Duration::ZERO)
        }

        fn slow(count: usize, delay: Duration) -> Arc<Self> {
            let hits = (0..count)
                .map(|i| {
                    RawHit::new(format!("hit {i}"), format!("https://site{i}.example/"), "")
                        .expect("valid hit")
                })
                .collect();
            Arc::new(Self {
                hits,
                calls: AtomicUsize::new(0),
                delay,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchProvider for FixedProvider {
        async fn search(&self, _query: &SearchQuery) -> Vec<RawHit> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.hits.clone()
        }

        fn provider_id(&self) -> &'static str {
            "fixed"
        }
    }

    /// Answers `variant N` with one hit on `variantN.example` after the
    /// delay configured for that variant.
    struct PerVariantProvider {
        delays: Vec<Duration>,
        calls: AtomicUsize,
    }

    impl PerVariantProvider {
        fn with_delays(delays: &[u64]) -> Arc<Self> {
            Arc::new(Self {
                delays: delays.iter().copied().map(Duration::from_secs).collect(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SearchProvider for PerVariantProvider {
        async fn search(&self, query: &SearchQuery) -> Vec<RawHit> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let index: usize = query
                .text
                .strip_prefix("variant ")
                .and_then(|n| n.parse().ok())
                .expect("variant query");

            tokio::time::sleep(self.delays[index]).await;
            RawHit::new(
                format!("variant {index}"),
                format!("https://variant{index}.example/"),
                "",
            )
            .into_iter()
            .collect()
        }

        fn provider_id(&self) -> &'static str {
            "per-variant"
        }
    }

    fn links(hits: &[RawHit]) -> Vec<&str> {
        hits.iter().map(|hit| hit.link.as_str()).collect()
    }

    fn plan(variants: usize) -> QueryPlan {
        let subject = Subject::named("Jane Smith").expect("valid");
        let primary: Vec<SearchQuery> = (0..variants)
            .map(|i| SearchQuery {
                text: format!("variant {i}"),
                subject: subject.clone(),
            })
            .collect();
        QueryPlan {
            fallback: primary[0].clone(),
            primary,
        }
    }

    #[test]
    fn test_tier_order() {
        assert_eq!(SearchTier::Primary.next(), Some(SearchTier::Secondary));
        assert_eq!(SearchTier::Secondary.next(), Some(SearchTier::Synthetic));
        assert_eq!(SearchTier::Synthetic.next(), None);
    }

    #[tokio::test]
    async fn test_primary_short_circuits() {
        let primary = FixedProvider::returning(2);
        let secondary = FixedProvider::returning(3);
        let synthetic = FixedProvider::returning(10);

        let orchestrator = FallbackOrchestrator::new(Duration::from_secs(5))
            .with_primary(primary.clone())
            .with_secondary(secondary.clone())
            .with_synthetic(synthetic.clone());

        let outcome = orchestrator.run(&plan(3), &CancellationToken::new()).await;

        assert_eq!(outcome.tier, Some(SearchTier::Primary));
        assert_eq!(outcome.hits.len(), 6);
        assert_eq!(primary.calls(), 3);
        assert_eq!(secondary.calls(), 0);
        assert_eq!(synthetic.calls(), 0);
        assert_eq!(outcome.attempts.len(), 1);
        assert!(!outcome.cancelled);
    }

    #[tokio::test]
    async fn test_unconfigured_tiers_count_as_empty() {
        let synthetic = FixedProvider::returning(4);
        let orchestrator =
            FallbackOrchestrator::new(Duration::from_secs(5)).with_synthetic(synthetic.clone());

        let outcome = orchestrator.run(&plan(2), &CancellationToken::new()).await;

        assert_eq!(outcome.tier, Some(SearchTier::Synthetic));
        assert_eq!(outcome.hits.len(), 4);
        let tiers: Vec<_> = outcome.attempts.iter().map(|a| a.tier).collect();
        assert_eq!(
            tiers,
            vec![SearchTier::Primary, SearchTier::Secondary, SearchTier::Synthetic]
        );
        assert_eq!(outcome.attempts[0].provider, None);
        assert_eq!(synthetic.calls(), 1);
    }

    #[tokio::test]
    async fn test_all_empty() {
        let primary = FixedProvider::returning(0);
        let secondary = FixedProvider::returning(0);
        let orchestrator = FallbackOrchestrator::new(Duration::from_secs(5))
            .with_primary(primary.clone())
            .with_secondary(secondary.clone());

        let outcome = orchestrator.run(&plan(1), &CancellationToken::new()).await;

        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.tier, None);
        assert_eq!(outcome.attempts.len(), 3);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_empty_and_falls_back() {
        let primary = FixedProvider::slow(5, Duration::from_secs(60));
        let secondary = FixedProvider::returning(1);
        let orchestrator = FallbackOrchestrator::new(Duration::from_secs(1))
            .with_primary(primary.clone())
            .with_secondary(secondary.clone());

        let outcome = orchestrator.run(&plan(1), &CancellationToken::new()).await;

        assert_eq!(outcome.tier, Some(SearchTier::Secondary));
        assert_eq!(outcome.hits.len(), 1);
        assert_eq!(outcome.attempts[0].hits, 0);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let primary = FixedProvider::returning(2);
        let orchestrator =
            FallbackOrchestrator::new(Duration::from_secs(5)).with_primary(primary.clone());

        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = orchestrator.run(&plan(1), &cancel).await;

        assert!(outcome.cancelled);
        assert!(outcome.hits.is_empty());
        assert!(outcome.attempts.is_empty());
        assert_eq!(primary.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_sequential_primary_keeps_collected() {
        let primary = FixedProvider::slow(2, Duration::from_secs(2));
        let secondary = FixedProvider::returning(3);
        let orchestrator = FallbackOrchestrator::new(Duration::from_secs(10))
            .with_primary(primary.clone())
            .with_secondary(secondary.clone())
            .with_concurrent_variants(false);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.cancel();
        });

        let outcome = orchestrator.run(&plan(3), &cancel).await;

        assert!(outcome.cancelled);
        assert_eq!(outcome.hits.len(), 2);
        assert_eq!(outcome.tier, Some(SearchTier::Primary));
        assert_eq!(primary.calls(), 2);
        assert_eq!(secondary.calls(), 0);
    }
    #[tokio::test(start_paused = true)]
    async fn test_concurrent_variants_keep_variant_order() {
        // Variant 0 finishes last, variant 2 first.
        let primary = PerVariantProvider::with_delays(&[3, 2, 1]);
        let orchestrator =
            FallbackOrchestrator::new(Duration::from_secs(10)).with_primary(primary.clone());

        let outcome = orchestrator.run(&plan(3), &CancellationToken::new()).await;

        assert_eq!(outcome.tier, Some(SearchTier::Primary));
        assert_eq!(
            links(&outcome.hits),
            vec![
                "https://variant0.example/",
                "https://variant1.example/",
                "https://variant2.example/",
            ]
        );
        assert_eq!(primary.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_concurrent_primary_keeps_finished_variants() {
        let primary = PerVariantProvider::with_delays(&[0, 8, 8]);
        let secondary = FixedProvider::returning(3);
        let orchestrator = FallbackOrchestrator::new(Duration::from_secs(10))
            .with_primary(primary.clone())
            .with_secondary(secondary.clone());

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.cancel();
        });

        let outcome = orchestrator.run(&plan(3), &cancel).await;

        assert!(outcome.cancelled);
        assert_eq!(outcome.tier, Some(SearchTier::Primary));
        assert_eq!(links(&outcome.hits), vec!["https://variant0.example/"]);
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!(outcome.attempts[0].hits, 1);
        assert_eq!(secondary.calls(), 0);
    }
}
