//! Error types for the broker subsystem.

use thiserror::Error;

/// Errors that can occur in broker operations.
#[derive(Error, Debug)]
pub enum BrokerError {
    /// Broker not found for a domain
    #[error("broker not found for domain: {domain}")]
    NotFound {
        /// The domain that was not found
        domain: String,
    },

    /// Failed to load a registry file
    #[error("failed to load broker registry from {path}: {source}")]
    LoadError {
        /// Path to the registry file
        path: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse registry TOML
    #[error("failed to parse broker registry TOML in {path}: {source}")]
    ParseError {
        /// Path to the registry file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Invalid broker entry (validation failed)
    #[error("invalid broker entry for {domain}: {reason}")]
    ValidationError {
        /// Domain of the entry being validated
        domain: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Two entries claim the same domain
    #[error("duplicate broker domain: {domain}")]
    DuplicateDomain {
        /// The repeated domain
        domain: String,
    },

    /// Registry path not found
    #[error("broker registry not found at {path}")]
    PathNotFound {
        /// Expected file or directory path
        path: String,
    },

    /// I/O error while accessing registry files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for broker operations.
pub type Result<T> = std::result::Result<T, BrokerError>;
