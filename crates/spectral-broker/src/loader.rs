//! Broker registry loading from TOML files.
//!
//! A registry file holds one `[[broker]]` table per site:
//!
//! ```toml
//! [[broker]]
//! domain = "spokeo.com"
//! name = "Spokeo"
//! category = "people-search"
//! severity = "high"
//! removal_difficulty = "easy"
//! removal_url = "https://www.spokeo.com/optout"
//! data_types = ["name", "address", "phone"]
//! weight = 15
//! ```

use crate::{
    definition::BrokerInfo,
    error::{BrokerError, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// On-disk shape of a registry file.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    broker: Vec<BrokerInfo>,
}

/// Loader for broker registry files.
///
/// The source may be a single TOML file or a directory of them. Directory
/// entries are visited in file-name order so the resulting registry order is
/// stable across platforms.
pub struct BrokerLoader {
    source: PathBuf,
}

impl BrokerLoader {
    /// Create a new loader for a file or directory.
    ///
    /// # Errors
    /// Returns error if the path doesn't exist.
    pub fn new(source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();

        if !source.exists() {
            return Err(BrokerError::PathNotFound {
                path: source.display().to_string(),
            });
        }

        Ok(Self { source })
    }

    /// Load every broker entry from the source.
    ///
    /// A single file is loaded strictly: any parse or validation failure is an
    /// error. In a directory, invalid files are logged as warnings and skipped.
    ///
    /// # Errors
    /// Returns error if the source can't be read.
    pub fn load_all(&self) -> Result<Vec<BrokerInfo>> {
        let entries = if self.source.is_dir() {
            let mut entries = Vec::new();
            Self::walk_and_load_recursive(&self.source, &mut entries)?;
            entries
        } else {
            let entries = Self::load_from_path(&self.source)?;
            for entry in &entries {
                entry.validate()?;
            }
            entries
        };

        info!(
            count = entries.len(),
            source = %self.source.display(),
            "loaded broker entries"
        );

        Ok(entries)
    }

    /// Recursively walk a directory and load all TOML files.
    fn walk_and_load_recursive(dir: &Path, entries: &mut Vec<BrokerInfo>) -> Result<()> {
        let mut paths = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        for path in paths {
            if path.is_dir() {
                Self::walk_and_load_recursive(&path, entries)?;
                continue;
            }

            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }

            match Self::load_from_path(&path) {
                Ok(loaded) => {
                    if let Some(e) = loaded.iter().find_map(|entry| entry.validate().err()) {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "skipping invalid broker registry file"
                        );
                        continue;
                    }
                    debug!(path = %path.display(), count = loaded.len(), "loaded registry file");
                    entries.extend(loaded);
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to load broker registry file"
                    );
                }
            }
        }

        Ok(())
    }

    /// Load entries from a specific file path.
    fn load_from_path(path: &Path) -> Result<Vec<BrokerInfo>> {
        let contents = std::fs::read_to_string(path).map_err(|e| BrokerError::LoadError {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        let file: RegistryFile = toml::from_str(&contents).map_err(|e| BrokerError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(file.broker)
    }
}
