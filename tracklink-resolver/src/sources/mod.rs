//! Metadata sources (fetch tiers)
//!
//! # Tiers
//! 1. **youtube_data** - YouTube Data API v3 list endpoints (needs API key)
//! 2. **oembed** - public oEmbed endpoint keyed by the raw URL
//!
//! Each source implements `MetadataSource` and reports every upstream
//! failure as `FetchOutcome::Empty` so the resolver can move on to the next
//! tier with a plain branch.

pub mod oembed;
pub mod youtube_data;

pub use oembed::OEmbedClient;
pub use youtube_data::YouTubeDataClient;

use crate::error::UpstreamError;
use crate::types::{FetchOutcome, RawMetadata};
use std::time::Duration;
use tracing::{debug, warn};

/// User-Agent header sent to upstream services
pub(crate) const USER_AGENT: &str = concat!("tracklink/", env!("CARGO_PKG_VERSION"));

/// Build the shared reqwest client for a source
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| UpstreamError::Network(e.to_string()))
}

/// Collapse a source result into an outcome, logging the failure
pub(crate) fn into_outcome(
    source: &'static str,
    result: Result<RawMetadata, UpstreamError>,
) -> FetchOutcome {
    match result {
        Ok(raw) => {
            debug!(
                source,
                title = %raw.title,
                channel = %raw.channel_title,
                "Source returned metadata"
            );
            FetchOutcome::Found(raw)
        }
        Err(e) => {
            warn!(source, error = %e, "Source yielded no metadata");
            FetchOutcome::Empty
        }
    }
}
