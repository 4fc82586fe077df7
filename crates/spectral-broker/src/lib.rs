//! Spectral Broker - Registry of known data-broker sites.
//!
//! This crate provides the curated table of data-broker domains and their
//! risk metadata, along with hostname normalization and loading of
//! replacement tables from TOML files.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): Strongly-typed broker metadata
//! - **Built-in Table** ([`builtin`]): The default broker table
//! - **Domains** ([`domain`]): Hostname extraction and `www.` stripping
//! - **Loader** ([`loader`]): TOML file loading for registry overrides
//! - **Registry** ([`registry`]): Immutable lookup table with query support
//! - **Errors** ([`error`]): Broker-specific error types
//!
//! # Example
//!
//! ```rust
//! use spectral_broker::{BrokerRegistry, Severity};
//!
//! let registry = BrokerRegistry::builtin();
//!
//! let info = registry
//!     .lookup("https://sub.spokeo.com/Jane-Smith")
//!     .expect("spokeo is a known broker");
//! assert_eq!(info.name, "Spokeo");
//! assert_eq!(info.severity, Severity::High);
//!
//! assert!(registry.lookup("not a url").is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod builtin;
pub mod definition;
pub mod domain;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use definition::{BrokerCategory, BrokerInfo, RemovalDifficulty, Severity};
pub use domain::normalize_host;
pub use error::{BrokerError, Result};
pub use loader::BrokerLoader;
pub use registry::BrokerRegistry;
