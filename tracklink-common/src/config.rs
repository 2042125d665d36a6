//! Bootstrap configuration loading
//!
//! The TOML file is optional. `find_toml_config` reports a missing or
//! unreadable file as an error; the binary logs it and starts on compiled
//! defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default HTTP port for the resolver service
pub const DEFAULT_PORT: u16 = 5790;

/// Default YouTube Data API v3 base URL
pub const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default public oEmbed endpoint
pub const DEFAULT_OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// Default base for synthesized track links
pub const DEFAULT_SERVICE_BASE_URL: &str = "https://open.spotify.com";

/// Default per-request timeout for outbound HTTP calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional in the file; absent fields take the compiled
/// defaults above.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// YouTube Data API key (optional, primary tier is skipped without it)
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// YouTube Data API base URL
    #[serde(default = "default_youtube_api_base_url")]
    pub youtube_api_base_url: String,

    /// oEmbed endpoint used by the fallback tier
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,

    /// Base URL for synthesized track links
    #[serde(default = "default_service_base_url")]
    pub service_base_url: String,

    /// Timeout applied to each outbound HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            youtube_api_key: None,
            youtube_api_base_url: default_youtube_api_base_url(),
            oembed_endpoint: default_oembed_endpoint(),
            service_base_url: default_service_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_youtube_api_base_url() -> String {
    DEFAULT_YOUTUBE_API_BASE_URL.to_string()
}

fn default_oembed_endpoint() -> String {
    DEFAULT_OEMBED_ENDPOINT.to_string()
}

fn default_service_base_url() -> String {
    DEFAULT_SERVICE_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Parse TOML configuration from a file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed ({}): {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Locate and read the TOML configuration
///
/// Uses `explicit_path` when given, otherwise the platform config file.
/// Returns `Ok(None)` when no explicit path was given and no platform file
/// exists.
pub fn find_toml_config(explicit_path: Option<&Path>) -> Result<Option<TomlConfig>> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match default_config_file() {
            Ok(path) => path,
            Err(e) => {
                debug!("No config file found ({})", e);
                return Ok(None);
            }
        },
    };

    let config = read_toml_config(&path)?;
    debug!(path = %path.display(), "Loaded TOML config");
    Ok(Some(config))
}

/// Get default configuration file path for the platform
///
/// Linux checks `~/.config/tracklink/config.toml` then
/// `/etc/tracklink/config.toml`.
pub fn default_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("tracklink").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/tracklink/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Validate a secret or key value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Read the first non-blank value among the given environment variables
pub fn first_env_var(names: &[&str]) -> Option<(String, String)> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .filter(|value| is_valid_key(value))
            .map(|value| (name.to_string(), value))
    })
}
