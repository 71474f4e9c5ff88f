//! Switch levels for categories that nobody registered explicitly
//!
//! ```toml
//! default_level = "off"
//!
//! [sources."My.Category"]
//! level = "information"
//! ```

use crate::errors::{LogSourceError, Result};
use logsource_core_types::SourceLevel;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Switch configuration per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Level for categories without an entry
    #[serde(default)]
    pub default_level: SourceLevel,
    #[serde(default)]
    pub sources: BTreeMap<String, SourceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    pub level: SourceLevel,
}

impl SourceConfig {
    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Io` if the file cannot be read, or
    /// `ErrorKind::Config` if it is not a valid configuration.
    pub fn load(path: &Path) -> Result<SourceConfig> {
        let content = fs::read_to_string(path).map_err(|e| LogSourceError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::Config` on a parse error or an empty category name.
    pub fn from_toml_str(content: &str) -> Result<SourceConfig> {
        let config: SourceConfig = toml::from_str(content).map_err(|e| LogSourceError::Config {
            reason: format!("TOML parse error: {}", e),
        })?;

        if config.sources.contains_key("") {
            return Err(LogSourceError::Config {
                reason: "Source name empty".to_string(),
            });
        }

        Ok(config)
    }

    /// Set the level of a single category
    pub fn with_source(mut self, name: impl Into<String>, level: SourceLevel) -> Self {
        self.sources.insert(name.into(), SourceEntry { level });
        self
    }

    /// The switch level configured for `name`
    pub fn level_for(&self, name: &str) -> SourceLevel {
        self.sources
            .get(name)
            .map(|entry| entry.level)
            .unwrap_or(self.default_level)
    }
}
