//! Spectral Risk - Exposure classification and privacy-risk scoring.
//!
//! Turns enriched exposure records into a quantified assessment: a weighted
//! 0-100 score, a letter grade, a severity histogram, a summary and an
//! ordered list of remediation recommendations.
//!
//! # Modules
//!
//! - [`classifier`] - Rule-based inference of exposed data categories
//! - [`exposure`] - The `Exposure` record, removal instructions and opt-out hand-off
//! - [`assessment`] - `RiskAssessment`, `Grade` and `ExposureStats`
//! - [`scorer`] - `RiskScorer`, the weighted scoring function
//!
//! # Example
//!
//! ```rust
//! use spectral_broker::BrokerRegistry;
//! use spectral_risk::{Grade, RiskScorer};
//!
//! let scorer = RiskScorer::new(BrokerRegistry::builtin());
//! let assessment = scorer.score(Vec::new());
//!
//! assert_eq!(assessment.score, 0);
//! assert_eq!(assessment.grade, Grade::A);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assessment;
pub mod classifier;
pub mod exposure;
pub mod scorer;

// Re-export commonly used types
pub use assessment::{ExposureStats, Grade, RiskAssessment};
pub use classifier::classify;
pub use exposure::{removal_instructions, Exposure, OptOutRequest, OptOutUserData};
pub use scorer::{RiskScorer, DEFAULT_SITE_WEIGHT};
