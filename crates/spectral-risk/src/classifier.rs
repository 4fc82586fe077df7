//! Rule-based inference of exposed data categories.
//!
//! Used for sites that are not in the broker registry. Each rule is an
//! independent case-insensitive pattern over the search snippet; the result
//! is a heuristic, so false negatives are expected. The only guarantees are
//! determinism and a non-empty result.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex, RegexBuilder};
use spectral_core::DataCategory;

/// A single classification rule.
struct Rule {
    category: DataCategory,
    regex: &'static Lazy<Regex>,
}

/// Rules in output order.
static RULES: [Rule; 7] = [
    Rule {
        category: DataCategory::Address,
        regex: &ADDRESS_REGEX,
    },
    Rule {
        category: DataCategory::Phone,
        regex: &PHONE_REGEX,
    },
    Rule {
        category: DataCategory::Email,
        regex: &EMAIL_REGEX,
    },
    Rule {
        category: DataCategory::Age,
        regex: &AGE_REGEX,
    },
    Rule {
        category: DataCategory::Relatives,
        regex: &RELATIVES_REGEX,
    },
    Rule {
        category: DataCategory::Criminal,
        regex: &CRIMINAL_REGEX,
    },
    Rule {
        category: DataCategory::Assets,
        regex: &ASSETS_REGEX,
    },
];

/// Infer which categories of personal data a snippet exposes.
///
/// The subject's own name is blanked out first so that it cannot satisfy a
/// rule by itself (a subject called "Jane Street" is not an address). Returns
/// `[DataCategory::Name]` when no rule matches.
#[must_use]
pub fn classify(snippet: &str, subject_name: &str) -> Vec<DataCategory> {
    let text = mask_subject(snippet, subject_name);

    let mut found: Vec<DataCategory> = RULES
        .iter()
        .filter(|rule| rule.regex.is_match(&text))
        .map(|rule| rule.category)
        .collect();

    if found.is_empty() {
        found.push(DataCategory::Name);
    }

    found
}

/// Replace every case-insensitive occurrence of the subject's name with a space.
fn mask_subject(snippet: &str, subject_name: &str) -> String {
    let name = subject_name.trim();
    if name.is_empty() {
        return snippet.to_string();
    }

    match RegexBuilder::new(&regex::escape(name))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(snippet, NoExpand(" ")).into_owned(),
        Err(e) => {
            tracing::debug!(error = %e, "could not mask subject name; classifying raw snippet");
            snippet.to_string()
        }
    }
}

static ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:address(?:es)?|street|avenue|ave|road|boulevard|blvd|lane|drive|residence|zip(?:\s?code)?|house)\b|\b(?:st|rd|apt)\.|\blive[sd]?\s+in\b",
    )
    .expect("valid address regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b|\bphone")
        .expect("valid phone regex")
});

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)@|\be-?mail").expect("valid email regex"));

static AGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:age[sd]?|born|birth(?:day|date)?|dob|years\s+old)\b")
        .expect("valid age regex")
});

static RELATIVES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:relatives?|family|associates?|spouse|siblings?|parents|related\s+to)\b",
    )
    .expect("valid relatives regex")
});

static CRIMINAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:criminal|crimes?|courts?|arrest(?:s|ed)?|felon(?:y|ies)|misdemeanors?|convictions?|offenders?|mugshots?)\b",
    )
    .expect("valid criminal regex")
});

static ASSETS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:assets?|property|properties|real\s+estate|home\s+values?|vehicles?|net\s+worth)\b",
    )
    .expect("valid assets regex")
});
