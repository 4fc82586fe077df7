//! Deterministic synthetic results.
//!
//! The last tier, used when neither real backend produced anything. Output
//! depends only on the subject's name, location and email, so the same
//! subject always yields the same hits.

use super::SearchProvider;
use crate::hit::RawHit;
use crate::query::SearchQuery;
use crate::subject::Subject;
use async_trait::async_trait;
use tracing::debug;

const PROVIDER_ID: &str = "synthetic";

/// Sites the synthetic tier reports listings on, with a listing blurb.
const SYNTHETIC_SITES: [(&str, &str, &str); 10] = [
    ("spokeo.com", "Spokeo", "Phone, email, address history and relatives."),
    ("whitepages.com", "Whitepages", "Current address, phone numbers and relatives."),
    ("beenverified.com", "BeenVerified", "Background report with criminal records and property."),
    ("radaris.com", "Radaris", "Address, phone and social profiles."),
    ("fastpeoplesearch.com", "Fast People Search", "Free people search with address, phone and relatives."),
    ("truepeoplesearch.com", "True People Search", "Addresses, phone numbers and associated persons."),
    ("intelius.com", "Intelius", "Background check with court records, relatives and assets."),
    ("mylife.com", "MyLife", "Reputation score and background profile."),
    ("instantcheckmate.com", "Instant Checkmate", "Criminal records, arrest reports and assets."),
    ("peoplefinder.com", "PeopleFinder", "Contact details and relatives."),
];

/// Site that receives the reverse-email listing.
const REVERSE_EMAIL_SITE: (&str, &str) = ("beenverified.com", "BeenVerified");

/// Tertiary tier: fabricates plausible broker listings for the subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticProvider;

impl SyntheticProvider {
    /// Create a synthetic provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate hits for a subject.
    ///
    /// Ten listings, plus a reverse-email listing when an email is known.
    #[must_use]
    pub fn generate(subject: &Subject) -> Vec<RawHit> {
        let name = subject.name.as_str();
        let age = synthetic_age(name);
        let name_slug = slug(name, "-");
        let location_path = subject
            .city_state
            .as_deref()
            .map(|location| format!("/{}", slug(location, "-")))
            .unwrap_or_default();
        let location_phrase = subject
            .city_state
            .as_deref()
            .map(|location| format!(" in {location}"))
            .unwrap_or_default();

        let mut hits: Vec<RawHit> = SYNTHETIC_SITES
            .iter()
            .filter_map(|(domain, broker, blurb)| {
                RawHit::new(
                    format!("{name} - {broker}"),
                    format!("https://www.{domain}/{name_slug}{location_path}"),
                    format!("{name}, age {age}{location_phrase}. {blurb}"),
                )
            })
            .collect();

        if let Some(email) = subject.email.as_deref() {
            let (domain, broker) = REVERSE_EMAIL_SITE;
            hits.extend(RawHit::new(
                format!("Reverse email lookup: {email} | {broker}"),
                format!("https://www.{domain}/email/{}", slug(email, "-")),
                format!("{email} is associated with {name}{location_phrase}."),
            ));
        }

        hits
    }
}

#[async_trait]
impl SearchProvider for SyntheticProvider {
    async fn search(&self, query: &SearchQuery) -> Vec<RawHit> {
        let hits = Self::generate(&query.subject);
        debug!(provider = PROVIDER_ID, count = hits.len(), "generated synthetic results");
        hits
    }

    fn provider_id(&self) -> &'static str {
        PROVIDER_ID
    }
}

/// Age in `25..75`, stable for a given name regardless of case.
fn synthetic_age(name: &str) -> u64 {
    25 + fnv1a(name.to_lowercase().as_bytes()) % 50
}

/// 64-bit FNV-1a.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}

/// URL path segment: alphanumeric runs joined by `sep`.
fn slug(text: &str, sep: &str) -> String {
    let parts: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        "search".to_string()
    } else {
        parts.join(sep)
    }
}
