//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shareable link settings
    #[serde(default)]
    pub share: ShareConfig,

    /// Catalog data locations
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Serialize to TOML, e.g. to write a starter config.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.share.base_url()?;
        if self.catalog.snapshot_file.trim().is_empty() {
            return Err(AppError::validation("catalog.snapshot_file is empty"));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not a known level",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Seed path resolved against a base directory, if configured.
    pub fn seed_path(&self, base: &Path) -> Option<PathBuf> {
        self.catalog.seed_path.as_ref().map(|p| base.join(p))
    }
}

/// Settings for building shareable links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Page the fragment is attached to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl ShareConfig {
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| {
            AppError::config(format!("share.base_url '{}' is invalid: {}", self.base_url, e))
        })
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
        }
    }
}

/// Where catalog data is read from and written to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Optional TOML seed replacing the built-in castles
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Snapshot file name inside the storage directory
    #[serde(default = "defaults::snapshot_file")]
    pub snapshot_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            snapshot_file: defaults::snapshot_file(),
        }
    }
}

/// Logging behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when neither RUST_LOG nor --verbose is given
    #[serde(default = "defaults::level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://gojoin-map.example/".into()
    }
    pub fn snapshot_file() -> String {
        "catalog.json".into()
    }
    pub fn level() -> String {
        "info".into()
    }
}
