//! Configuration management for Spectral.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Marker used by sample `.env` files for credentials that were never filled in.
const PLACEHOLDER_MARKER: &str = "your_";

/// Main application configuration.
///
/// This is loaded from `~/.config/spectral/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search provider settings
    pub search: SearchConfig,
    /// Broker registry settings
    pub registry: RegistryConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SPECTRAL_GOOGLE_API_KEY` (or `GOOGLE_API_KEY`): primary search API key
    /// - `SPECTRAL_GOOGLE_CX` (or `GOOGLE_SEARCH_CX`): primary search engine ID
    /// - `SPECTRAL_SEARCH_TIMEOUT_SECS`: per-call provider timeout
    /// - `SPECTRAL_REGISTRY_PATH`: broker registry TOML override
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// The lookup is injected so the override rules can be exercised without
    /// touching the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_of = |keys: &[&str]| keys.iter().find_map(|key| lookup(*key));

        if let Some(key) = first_of(&["SPECTRAL_GOOGLE_API_KEY", "GOOGLE_API_KEY"]) {
            self.search.google_api_key = Some(key);
            tracing::debug!("Override search.google_api_key from env");
        }

        if let Some(cx) = first_of(&["SPECTRAL_GOOGLE_CX", "GOOGLE_SEARCH_CX"]) {
            self.search.google_cx = Some(cx);
            tracing::debug!("Override search.google_cx from env");
        }

        if let Some(val) = lookup("SPECTRAL_SEARCH_TIMEOUT_SECS") {
            match val.parse() {
                Ok(secs) => {
                    self.search.timeout_secs = secs;
                    tracing::debug!("Override search.timeout_secs from env: {}", secs);
                }
                Err(e) => {
                    tracing::warn!(
                        value = %val,
                        error = %e,
                        "ignoring unparsable SPECTRAL_SEARCH_TIMEOUT_SECS"
                    );
                }
            }
        }

        if let Some(path) = lookup("SPECTRAL_REGISTRY_PATH") {
            tracing::debug!("Override registry.definitions_path from env: {}", path);
            self.registry.definitions_path = Some(PathBuf::from(path));
        }
    }

    /// Validate value ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search.max_query_variants == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.max_query_variants".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.search.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self
            .search
            .broker_domains
            .iter()
            .any(|domain| domain.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "search.broker_domains".to_string(),
                reason: "domains cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to the default location.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/spectral/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "spectral", "spectral").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API key for the primary structured search API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,
    /// Search engine ID for the primary structured search API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_cx: Option<String>,
    /// Maximum number of query variants sent to the primary tier
    pub max_query_variants: usize,
    /// Per-call provider timeout in seconds
    pub timeout_secs: u64,
    /// Issue primary query variants concurrently
    pub concurrent_variants: bool,
    /// Maximum results parsed from one secondary results page
    pub secondary_max_results: usize,
    /// User agent string sent by HTTP providers
    pub user_agent: String,
    /// Site allow-list; empty means every domain in the broker registry
    pub broker_domains: Vec<String>,
    /// Whether the synthetic tier may run when both real tiers come back empty
    pub synthetic_fallback: bool,
}

impl SearchConfig {
    /// Primary search credentials, if both are present and not placeholders.
    #[must_use]
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        Some((
            usable_credential(self.google_api_key.as_deref())?,
            usable_credential(self.google_cx.as_deref())?,
        ))
    }

    /// Per-call provider timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_cx: None,
            max_query_variants: 3,
            timeout_secs: 15,
            concurrent_variants: true,
            secondary_max_results: 15,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            broker_domains: Vec::new(),
            synthetic_fallback: true,
        }
    }
}

fn usable_credential(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.contains(PLACEHOLDER_MARKER))
}

/// Broker registry settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// TOML file replacing the built-in broker table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions_path: Option<PathBuf>,
}
