//! Site-restricted query construction.

use crate::subject::Subject;
use spectral_broker::BrokerRegistry;
use spectral_core::SearchConfig;

/// A query handed to a search provider.
///
/// Real providers only send `text`. The synthetic tier has no index to
/// search and builds its results from `subject` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Site-restricted query string
    pub text: String,
    /// Subject the query was built for
    pub subject: Subject,
}

/// Queries for every tier of one scan.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Primary tier variants, in priority order
    pub primary: Vec<SearchQuery>,
    /// Single query used by the fallback tiers
    pub fallback: SearchQuery,
}

/// Builds site-restricted queries for a subject.
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    domains: Vec<String>,
    max_variants: usize,
}

impl QueryPlanner {
    /// Create a planner restricting results to `domains`.
    ///
    /// An empty domain list produces unrestricted queries.
    #[must_use]
    pub fn new(domains: Vec<String>, max_variants: usize) -> Self {
        Self {
            domains,
            max_variants: max_variants.max(1),
        }
    }

    /// Create a planner from configuration, falling back to the registry's
    /// domains when no allow-list is configured.
    #[must_use]
    pub fn from_config(config: &SearchConfig, registry: &BrokerRegistry) -> Self {
        let domains = if config.broker_domains.is_empty() {
            registry.domains().into_iter().map(String::from).collect()
        } else {
            config
                .broker_domains
                .iter()
                .map(|d| d.trim().to_lowercase())
                .collect()
        };

        Self::new(domains, config.max_query_variants)
    }

    /// The `(site:a OR site:b ...)` clause, or an empty string.
    #[must_use]
    pub fn site_filter(&self) -> String {
        if self.domains.is_empty() {
            return String::new();
        }

        let sites: Vec<String> = self.domains.iter().map(|d| format!("site:{d}")).collect();
        format!("({})", sites.join(" OR "))
    }

    /// Search terms for the subject in priority order, before capping.
    ///
    /// Base name, name with location, email, phone digits. Absent attributes
    /// are skipped.
    #[must_use]
    pub fn variants(subject: &Subject) -> Vec<String> {
        let mut variants = vec![format!("\"{}\"", subject.name)];

        if let Some(location) = &subject.city_state {
            variants.push(format!("\"{}\" \"{location}\"", subject.name));
        }

        if let Some(email) = &subject.email {
            variants.push(format!("\"{email}\""));
        }

        if let Some(digits) = subject.phone_digits() {
            variants.push(format!("\"{digits}\""));
        }

        variants
    }

    /// Build the queries for every tier.
    #[must_use]
    pub fn plan(&self, subject: &Subject) -> QueryPlan {
        let filter = self.site_filter();

        let primary: Vec<SearchQuery> = Self::variants(subject)
            .into_iter()
            .take(self.max_variants)
            .map(|terms| SearchQuery {
                text: restrict(&terms, &filter),
                subject: subject.clone(),
            })
            .collect();

        // The base-name variant always exists, so `primary` is never empty.
        let fallback = primary.first().cloned().unwrap_or_else(|| SearchQuery {
            text: restrict(&format!("\"{}\"", subject.name), &filter),
            subject: subject.clone(),
        });

        QueryPlan { primary, fallback }
    }
}

fn restrict(terms: &str, filter: &str) -> String {
    if filter.is_empty() {
        terms.to_string()
    } else {
        format!("{terms} {filter}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> QueryPlanner {
        QueryPlanner::new(vec!["spokeo.com".to_string(), "mylife.com".to_string()], 3)
    }

    #[test]
    fn test_site_filter() {
        assert_eq!(
            planner().site_filter(),
            "(site:spokeo.com OR site:mylife.com)"
        );
        assert_eq!(QueryPlanner::new(Vec::new(), 3).site_filter(), "");
    }

    #[test]
    fn test_name_only_plan() {
        let subject = Subject::named("Jane Smith").expect("valid");
        let plan = planner().plan(&subject);

        assert_eq!(plan.primary.len(), 1);
        assert_eq!(
            plan.primary[0].text,
            "\"Jane Smith\" (site:spokeo.com OR site:mylife.com)"
        );
        assert_eq!(plan.fallback, plan.primary[0]);
    }

    #[test]
    fn test_variants_capped_in_priority_order() {
        let subject = Subject::new(
            "Jane Smith",
            Some("Austin, TX"),
            Some("jane@example.com"),
            Some("512-555-0199"),
        )
        .expect("valid");

        assert_eq!(QueryPlanner::variants(&subject).len(), 4);

        let texts: Vec<_> = planner()
            .plan(&subject)
            .primary
            .into_iter()
            .map(|q| q.text)
            .collect();
        assert_eq!(texts.len(), 3);
        assert!(texts[0].starts_with("\"Jane Smith\" (site:"));
        assert!(texts[1].starts_with("\"Jane Smith\" \"Austin, TX\" (site:"));
        assert!(texts[2].starts_with("\"jane@example.com\" (site:"));
    }

    #[test]
    fn test_phone_variant_requires_ten_digits() {
        let subject = Subject::new("Jane", None, None, Some("555-0199")).expect("valid");
        assert_eq!(QueryPlanner::variants(&subject), vec!["\"Jane\""]);

        let subject = Subject::new("Jane", None, None, Some("+1 (512) 555-0199")).expect("valid");
        assert_eq!(
            QueryPlanner::variants(&subject),
            vec!["\"Jane\"", "\"15125550199\""]
        );
    }

    #[test]
    fn test_from_config_prefers_configured_domains() {
        let registry = BrokerRegistry::builtin();
        let mut config = SearchConfig::default();

        let from_registry = QueryPlanner::from_config(&config, &registry);
        assert!(from_registry.site_filter().contains("site:peoplefinder.com"));

        config.broker_domains = vec![" Example.COM ".to_string()];
        let configured = QueryPlanner::from_config(&config, &registry);
        assert_eq!(configured.site_filter(), "(site:example.com)");
    }
}
