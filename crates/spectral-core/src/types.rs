//! Shared types used across the Spectral exposure scanner.

use crate::error::SpectralError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories of personal data that can be exposed on a site.
///
/// Used both for the data types a known broker publishes and for the
/// categories the content classifier infers from search snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataCategory {
    /// Full name (every search hit confirms at least a name match)
    Name,
    /// Street or mailing address
    Address,
    /// Phone number
    Phone,
    /// Email address
    Email,
    /// Age or date of birth
    Age,
    /// Relatives and associates
    Relatives,
    /// Criminal and court records
    Criminal,
    /// Property and other assets
    Assets,
    /// Social media profiles
    Social,
    /// Photos
    Photos,
    /// Employment history
    Employment,
    /// Education history
    Education,
    /// Professional skills
    Skills,
    /// Friends lists
    Friends,
    /// Posts and public activity
    Posts,
    /// Proprietary reputation score
    ReputationScore,
    /// Background report
    Background,
}

impl DataCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Name,
        Self::Address,
        Self::Phone,
        Self::Email,
        Self::Age,
        Self::Relatives,
        Self::Criminal,
        Self::Assets,
        Self::Social,
        Self::Photos,
        Self::Employment,
        Self::Education,
        Self::Skills,
        Self::Friends,
        Self::Posts,
        Self::ReputationScore,
        Self::Background,
    ];

    /// Get the wire tag (`"reputation-score"`, `"phone"`, ...).
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Age => "age",
            Self::Relatives => "relatives",
            Self::Criminal => "criminal",
            Self::Assets => "assets",
            Self::Social => "social",
            Self::Photos => "photos",
            Self::Employment => "employment",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Friends => "friends",
            Self::Posts => "posts",
            Self::ReputationScore => "reputation-score",
            Self::Background => "background",
        }
    }

    /// Get a human-readable display name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Address => "Street Address",
            Self::Phone => "Phone Number",
            Self::Email => "Email Address",
            Self::Age => "Age",
            Self::Relatives => "Relatives",
            Self::Criminal => "Criminal Records",
            Self::Assets => "Assets",
            Self::Social => "Social Profiles",
            Self::Photos => "Photos",
            Self::Employment => "Employment",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Friends => "Friends",
            Self::Posts => "Posts",
            Self::ReputationScore => "Reputation Score",
            Self::Background => "Background Report",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DataCategory {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.tag() == needle)
            .ok_or_else(|| SpectralError::Validation(format!("unknown data category '{s}'")))
    }
}
