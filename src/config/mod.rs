//! Configuration module for dexr
//!
//! Manages application configuration: where the catalog comes from, how it is
//! paged and where favorites are stored. Configuration is stored in the user's
//! config directory and can be overridden with `DEXR_*` environment variables
//! (for example `DEXR_PAGE_SIZE=50`).

use crate::favorites::default_favorites_path;
use crate::gateway::http::DEFAULT_API_BASE_URL;
use crate::loader::DEFAULT_LIST_LIMIT;
use crate::view::{DEFAULT_PAGE_SIZE, SortKey};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DexConfig {
    /// Root of the PokeAPI-compatible REST service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of catalog entries requested from the index
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort order used when none is given
    #[serde(default)]
    pub default_sort: SortKey,

    /// Location of the favorites store; platform data directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites_path: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            list_limit: DEFAULT_LIST_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: SortKey::default(),
            favorites_path: None,
            quiet: false,
        }
    }
}

impl DexConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("dexr").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, created or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating a default file if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, created or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("DEXR").try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Check values that would break paging or loading
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Message("page_size must be at least 1".to_string()));
        }
        if self.list_limit == 0 {
            return Err(ConfigError::Message("list_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Resolved favorites store location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn favorites_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.favorites_path {
            Some(path) => Ok(path.clone()),
            None => default_favorites_path().map_err(|e| ConfigError::Message(e.to_string())),
        }
    }
}
