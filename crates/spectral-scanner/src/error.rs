//! Error types for exposure scanning.

use thiserror::Error;

/// Errors that can occur while scanning.
///
/// Only setup and input errors reach callers of the pipeline. Provider
/// failures during a scan are logged and turned into empty results.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Subject attributes failed validation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Provider cannot be constructed with the current configuration
    #[error("provider {provider} disabled: {reason}")]
    ProviderDisabled {
        /// Provider identifier
        provider: String,
        /// Why it is unavailable
        reason: String,
    },

    /// Provider returned an unusable response
    #[error("provider {provider} failed: {message}")]
    ProviderFailed {
        /// Provider identifier
        provider: String,
        /// Error message
        message: String,
    },

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Broker registry failure
    #[error("broker registry error: {0}")]
    Broker(#[from] spectral_broker::BrokerError),

    /// Configuration failure
    #[error("configuration error: {0}")]
    Config(#[from] spectral_core::ConfigError),
}

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;
