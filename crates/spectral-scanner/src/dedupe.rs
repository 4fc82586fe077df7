//! Hit deduplication.

use crate::hit::RawHit;
use std::collections::HashSet;

/// Remove hits whose link was already seen, ignoring case.
///
/// The first occurrence wins and relative order is preserved.
#[must_use]
pub fn dedupe(hits: Vec<RawHit>) -> Vec<RawHit> {
    let mut seen = HashSet::with_capacity(hits.len());

    hits.into_iter()
        .filter(|hit| seen.insert(hit.link.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, link: &str) -> RawHit {
        RawHit::new(title, link, "").expect("valid hit")
    }

    #[test]
    fn test_case_insensitive_first_wins() {
        let hits = vec![
            hit("first", "https://www.spokeo.com/Jane-Smith"),
            hit("other", "https://www.mylife.com/jane"),
            hit("dup", "HTTPS://WWW.SPOKEO.COM/JANE-SMITH"),
        ];

        let unique = dedupe(hits);
        let titles: Vec<_> = unique.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "other"]);
    }

    #[test]
    fn test_idempotent() {
        let hits = vec![
            hit("a", "https://a.example/"),
            hit("b", "https://b.example/"),
            hit("a2", "https://A.example/"),
        ];

        let once = dedupe(hits);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
