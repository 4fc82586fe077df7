//! Spectral Scanner - Exposure discovery across data broker sites.
//!
//! This crate finds where a person's data appears on broker sites and turns
//! the findings into a scored assessment. Search runs through a fixed
//! fallback chain (structured search API, document search, synthetic
//! generator); the first tier with results wins.
//!
//! # Features
//!
//! - Site-restricted query variants built from name, location, email and phone
//! - Per-call timeouts; provider failures degrade to empty results
//! - Cooperative cancellation through a `CancellationToken`
//! - Case-insensitive URL deduplication
//! - Registry enrichment with content classification for unknown sites
//!
//! # Example
//!
//! ```rust,ignore
//! use spectral_broker::BrokerRegistry;
//! use spectral_core::AppConfig;
//! use spectral_scanner::ExposureScanner;
//!
//! let config = AppConfig::load_with_env()?;
//! let scanner = ExposureScanner::from_config(&config, BrokerRegistry::builtin())?;
//!
//! let assessment = scanner
//!     .assess("Jane Smith", Some("Austin, TX"), None, None)
//!     .await?;
//! println!("{} ({})", assessment.score, assessment.grade);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod dedupe;
pub mod enrich;
pub mod error;
pub mod hit;
pub mod orchestrator;
pub mod pipeline;
pub mod provider;
pub mod query;
pub mod subject;

// Re-export commonly used types
pub use dedupe::dedupe;
pub use enrich::ExposureBuilder;
pub use error::{Result, ScanError};
pub use hit::RawHit;
pub use orchestrator::{FallbackOrchestrator, SearchOutcome, SearchTier, TierAttempt};
pub use pipeline::{DataSource, ExposureScanner, ScanReport};
pub use provider::{DuckDuckGoProvider, GoogleSearchProvider, SearchProvider, SyntheticProvider};
pub use query::{QueryPlan, QueryPlanner, SearchQuery};
pub use subject::Subject;
