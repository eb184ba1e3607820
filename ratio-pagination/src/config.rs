//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! [pagination]
//! primary_key = "_id"
//! default_limit = 20
//! max_limit = 100
//! verify_id_cursors = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pagination engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::exhaustive_structs)] // built with struct update syntax
pub struct PaginationConfig {
    /// Name of the primary-key field in the store.
    pub primary_key: String,
    /// Page size used when a caller does not specify one.
    pub default_limit: u32,
    /// Largest accepted page size; `None` accepts any positive limit.
    pub max_limit: Option<u32>,
    /// Look up primary-key cursors too, so unknown keys fail with
    /// `InvalidCursor`. When `false`, primary-key pagination costs a single
    /// store round-trip and never validates its cursor.
    pub verify_id_cursors: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            primary_key: "_id".to_string(),
            default_limit: 20,
            max_limit: None,
            verify_id_cursors: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    pagination: PaginationConfig,
}

/// Errors loading a [`PaginationConfig`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown keys.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A setting is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl PaginationConfig {
    /// Parse the `[pagination]` table of a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        file.pagination.validate()?;
        Ok(file.pagination)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Check settings for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_key.is_empty() {
            return Err(ConfigError::Invalid("primary_key cannot be empty"));
        }
        if self.default_limit == 0 {
            return Err(ConfigError::Invalid("default_limit must be at least 1"));
        }
        if self.max_limit == Some(0) {
            return Err(ConfigError::Invalid("max_limit must be at least 1"));
        }
        if self.max_limit.is_some_and(|max| self.default_limit > max) {
            return Err(ConfigError::Invalid("default_limit exceeds max_limit"));
        }
        Ok(())
    }

    /// Returns `true` if `limit` is an accepted page size.
    pub fn accepts_limit(&self, limit: u32) -> bool {
        limit >= 1 && self.max_limit.is_none_or(|max| limit <= max)
    }
}
