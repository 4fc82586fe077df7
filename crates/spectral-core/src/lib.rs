//! Spectral Core - Foundation crate for the Spectral exposure scanner.
//!
//! This crate provides shared types, error handling and configuration
//! management that all other Spectral crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared domain enums (`DataCategory`)
//!
//! # Example
//!
//! ```rust
//! use spectral_core::{AppConfig, DataCategory};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.search.max_query_variants, 3);
//! assert_eq!(DataCategory::Phone.to_string(), "Phone Number");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, RegistryConfig, SearchConfig};
pub use error::{ConfigError, ConfigResult, Result, SpectralError};
pub use types::DataCategory;
