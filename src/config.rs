//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Catalog (avatar / decoration provider) settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Fetch decorations at all.
    #[serde(default = "default_catalog_enabled")]
    enabled: bool,

    /// Base URL of the creature catalog API.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Highest catalog id to draw from.
    #[serde(default = "default_max_id")]
    max_id: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_catalog_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_max_id() -> u32 {
    1010
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            enabled: default_catalog_enabled(),
            base_url: default_base_url(),
            max_id: default_max_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    /// Creates a catalog configuration.
    pub fn new(enabled: bool, base_url: String, max_id: u32, timeout_secs: u64) -> Self {
        Self {
            enabled,
            base_url,
            max_id,
            timeout_secs,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    port: u16,

    /// File backing the persisted game settings.
    #[serde(default = "default_settings_path")]
    settings_path: PathBuf,

    /// Emit sound cues to the log.
    #[serde(default = "default_sound_log")]
    sound_log: bool,

    /// Catalog provider settings.
    #[serde(default)]
    catalog: CatalogConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("sugoroku_settings.toml")
}

fn default_sound_log() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            settings_path: default_settings_path(),
            sound_log: default_sound_log(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a given file cannot be loaded.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the bind address.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Overrides the settings file.
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.settings_path = path;
        }
        self
    }

    /// Turns the catalog off (offline play).
    pub fn offline(mut self) -> Self {
        self.catalog.enabled = false;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
