//! Configuration resolution for tracklink-resolver
//!
//! Per-setting priority: CLI flag → ENV → TOML → compiled default.
//! A missing YouTube API key is a warning: the primary tier then always
//! reports empty and the resolver runs on the oEmbed fallback alone.

use crate::error::UpstreamError;
use crate::orchestrator::TrackResolver;
use crate::services::IdSynthesizer;
use crate::sources::{OEmbedClient, YouTubeDataClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracklink_common::config::{first_env_var, is_valid_key, TomlConfig};

/// Environment variables checked for the YouTube API key, in priority order
pub const API_KEY_ENV_VARS: &[&str] = &["TRACKLINK_YOUTUBE_API_KEY", "YOUTUBE_API_KEY"];

/// Fully resolved runtime settings
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub port: u16,
    pub youtube_api_key: Option<String>,
    pub youtube_api_base_url: String,
    pub oembed_endpoint: String,
    pub service_base_url: String,
    pub request_timeout: Duration,
}

impl ResolverSettings {
    /// Merge CLI overrides (already ENV-aware via clap) over TOML values
    pub fn from_sources(toml_config: &TomlConfig, port_override: Option<u16>) -> Self {
        Self {
            port: port_override.unwrap_or(toml_config.port),
            youtube_api_key: resolve_youtube_api_key(toml_config),
            youtube_api_base_url: toml_config.youtube_api_base_url.clone(),
            oembed_endpoint: toml_config.oembed_endpoint.clone(),
            service_base_url: toml_config.service_base_url.clone(),
            request_timeout: Duration::from_secs(toml_config.request_timeout_secs.max(1)),
        }
    }

    /// Build a resolver wired to the real HTTP sources
    pub fn build_resolver(&self) -> Result<TrackResolver, UpstreamError> {
        let primary = YouTubeDataClient::new(
            self.youtube_api_base_url.clone(),
            self.youtube_api_key.clone(),
            self.request_timeout,
        )?;
        let fallback = OEmbedClient::new(self.oembed_endpoint.clone(), self.request_timeout)?;

        Ok(TrackResolver::new(
            Arc::new(primary),
            Arc::new(fallback),
            IdSynthesizer::new(self.service_base_url.clone()),
        ))
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_sources(&TomlConfig::default(), None)
    }
}

/// Resolve the YouTube Data API key
///
/// **Priority:** ENV (`TRACKLINK_YOUTUBE_API_KEY`, then `YOUTUBE_API_KEY`) → TOML
pub fn resolve_youtube_api_key(toml_config: &TomlConfig) -> Option<String> {
    let env_key = first_env_var(API_KEY_ENV_VARS);
    let toml_key = toml_config
        .youtube_api_key
        .as_ref()
        .filter(|key| is_valid_key(key));

    if env_key.is_some() && toml_key.is_some() {
        warn!("YouTube API key found in both environment and TOML. Using environment.");
    }

    if let Some((name, key)) = env_key {
        info!("YouTube API key loaded from environment variable {}", name);
        return Some(key);
    }

    if let Some(key) = toml_key {
        info!("YouTube API key loaded from TOML config");
        return Some(key.clone());
    }

    warn!(
        "YouTube API key not configured; primary metadata tier disabled. \
         Set {} or youtube_api_key in the TOML config.",
        API_KEY_ENV_VARS[0]
    );
    None
}
