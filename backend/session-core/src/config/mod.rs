//! Client configuration.
//!
//! Loaded from `{config_dir}/config.toml`, with `API_BASE_URL` from the
//! environment (or a `.env` file) taking precedence over the file.

use crate::DEFAULT_API_BASE_URL;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = "session-client";
const CONFIG_VERSION: u32 = 1;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Root URL of the REST backend (auth and example resources).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request transport timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Platform config directory for this client, e.g. `~/.config/session-client`.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Load config from {config_dir}/config.toml.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ClientConfig)` if loaded successfully or defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config = Self::load_from_path(&config_path)?;
        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Load and validate a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ClientConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `.env` and process environment overrides.
    ///
    /// A `.env` file in the working directory is loaded first (non-fatal if
    /// missing); variables already set in the process win over it.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => warn!("Failed to parse .env: {}", e),
        }

        match std::env::var(API_BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => {
                info!("Using {} from environment: {}", API_BASE_URL_ENV, value);
                self.api_base_url = value.trim().to_string();
            }
            Ok(_) => debug!("{} is set but empty, ignoring", API_BASE_URL_ENV),
            Err(std::env::VarError::NotPresent) => {}
            Err(std::env::VarError::NotUnicode(_)) => {
                warn!("{} contains invalid unicode, ignoring", API_BASE_URL_ENV);
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid timeout: {}s (must be {}-{})",
                    self.timeout_secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
                ),
            });
        }

        self.base_url()?;
        Ok(())
    }

    /// Parsed base URL, normalized to end with `/` so relative endpoints join below it.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.api_base_url).map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid URL '{}': {}", self.api_base_url, e),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL scheme: {}", self.api_base_url),
            });
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
