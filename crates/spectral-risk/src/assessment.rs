//! Risk assessment output model.

use crate::exposure::Exposure;
use serde::{Deserialize, Serialize};
use spectral_broker::Severity;
use std::fmt;

/// Letter grade derived from the capped risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 0-10
    A,
    /// 11-25
    B,
    /// 26-50
    C,
    /// 51-75
    D,
    /// 76-100
    F,
}

impl Grade {
    /// Grade for a score in `0..=100`.
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=10 => Self::A,
            11..=25 => Self::B,
            26..=50 => Self::C,
            51..=75 => Self::D,
            _ => Self::F,
        }
    }

    /// Single-letter form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity histogram of an assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureStats {
    /// Number of exposures
    pub total_exposures: usize,
    /// Exposures on critical-severity sites
    pub critical_count: usize,
    /// Exposures on high-severity sites
    pub high_count: usize,
    /// Exposures on medium-severity sites
    pub medium_count: usize,
    /// Exposures on low-severity sites
    pub low_count: usize,
}

impl ExposureStats {
    /// Count exposures by severity.
    #[must_use]
    pub fn from_exposures(exposures: &[Exposure]) -> Self {
        let mut stats = Self {
            total_exposures: exposures.len(),
            ..Self::default()
        };

        for exposure in exposures {
            match exposure.severity {
                Severity::Critical => stats.critical_count += 1,
                Severity::High => stats.high_count += 1,
                Severity::Medium => stats.medium_count += 1,
                Severity::Low => stats.low_count += 1,
            }
        }

        stats
    }
}

/// Scored result of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Weighted score, capped at 100
    pub score: u32,
    /// Letter grade for `score`
    pub grade: Grade,
    /// One-sentence description of the exposure level
    pub summary: String,
    /// Exposures ordered critical first; ties keep discovery order
    pub exposures: Vec<Exposure>,
    /// Remediation steps in priority order
    pub recommendations: Vec<String>,
    /// Severity histogram
    pub stats: ExposureStats,
}
