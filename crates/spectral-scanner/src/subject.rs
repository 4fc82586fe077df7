//! The person being searched for.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};

/// Minimum number of digits for a phone number to be searchable.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Identifying attributes of the scan subject.
///
/// Construct through [`Subject::new`], which trims every field and treats
/// empty optional strings as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Full name
    pub name: String,
    /// "City, ST" location hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_state: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number in any format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Subject {
    /// Validate and normalize subject attributes.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidInput`] if the name is empty after trimming.
    pub fn new(
        name: &str,
        city_state: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScanError::InvalidInput("full name is required".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            city_state: present(city_state),
            email: present(email),
            phone: present(phone),
        })
    }

    /// Shorthand for a name-only subject.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidInput`] if the name is empty after trimming.
    pub fn named(name: &str) -> Result<Self> {
        Self::new(name, None, None, None)
    }

    /// Digits of the phone number, if there are enough to search for.
    #[must_use]
    pub fn phone_digits(&self) -> Option<String> {
        let digits: String = self
            .phone
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        (digits.len() >= MIN_PHONE_DIGITS).then_some(digits)
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        assert!(matches!(
            Subject::new("   ", Some("Austin, TX"), None, None),
            Err(ScanError::InvalidInput(_))
        ));
        assert!(Subject::named("").is_err());
    }

    #[test]
    fn test_fields_trimmed_and_empty_optionals_dropped() {
        let subject = Subject::new("  Jane Smith ", Some(""), Some(" jane@example.com "), Some("  "))
            .expect("valid subject");

        assert_eq!(subject.name, "Jane Smith");
        assert_eq!(subject.city_state, None);
        assert_eq!(subject.email.as_deref(), Some("jane@example.com"));
        assert_eq!(subject.phone, None);
    }

    #[test]
    fn test_phone_digits() {
        let subject = Subject::new("Jane", None, None, Some("(512) 555-0199")).expect("valid");
        assert_eq!(subject.phone_digits().as_deref(), Some("5125550199"));

        let short = Subject::new("Jane", None, None, Some("555-0199")).expect("valid");
        assert_eq!(short.phone_digits(), None);

        assert_eq!(Subject::named("Jane").expect("valid").phone_digits(), None);
    }

    #[test]
    fn test_serializes_camel_case_without_absent_fields() {
        let subject = Subject::new("Jane", Some("Austin, TX"), None, None).expect("valid");
        let json = serde_json::to_value(&subject).expect("serialize");
        assert_eq!(json["cityState"], "Austin, TX");
        assert!(json.get("email").is_none());
    }
}
