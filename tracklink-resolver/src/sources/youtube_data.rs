//! YouTube Data API client (primary tier)
//!
//! Queries the v3 list endpoint matching the resource kind, requesting only
//! the `snippet` projection for a single id.
//!
//! # API Reference
//! - Endpoint: https://www.googleapis.com/youtube/v3/{videos|playlists}
//! - Parameters: `part=snippet&id={id}&key={api_key}`

use super::{http_client, into_outcome};
use crate::error::UpstreamError;
use crate::types::{FetchOutcome, LookupRequest, MetadataSource, RawMetadata, ResourceReference};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// List response (only the fields the resolver reads)
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    items: Vec<ListItem>,
}

#[derive(Debug, Deserialize)]
struct ListItem {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    channel_title: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    default_thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl Snippet {
    /// Medium thumbnail, then default, then none
    fn thumbnail_url(&self) -> Option<String> {
        let thumbnails = self.thumbnails.as_ref()?;
        [&thumbnails.medium, &thumbnails.default_thumbnail]
            .into_iter()
            .flatten()
            .filter_map(|t| t.url.clone())
            .find(|url| !url.is_empty())
    }
}

/// YouTube Data API v3 client
pub struct YouTubeDataClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeDataClient {
    pub const NAME: &'static str = "youtube-data-api";

    /// Create a client against `base_url` (e.g. `https://www.googleapis.com/youtube/v3`)
    ///
    /// A `None` or blank key leaves the client usable but every lookup
    /// comes back empty without touching the network.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let base_url: String = base_url.into();
        Ok(Self {
            http_client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up snippet metadata for a video or playlist
    pub async fn lookup(&self, reference: &ResourceReference) -> Result<RawMetadata, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingCredential)?;
        let url = format!("{}/{}", self.base_url, reference.kind.endpoint());

        debug!(kind = %reference.kind, id = %reference.id, url = %url, "Querying YouTube Data API");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("id", reference.id.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let list: ListResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        let snippet = list
            .items
            .into_iter()
            .next()
            .ok_or(UpstreamError::NoItems)?
            .snippet;

        Ok(match snippet {
            Some(snippet) => {
                let thumbnail_url = snippet.thumbnail_url();
                RawMetadata::with_defaults(snippet.title, snippet.channel_title, thumbnail_url)
            }
            None => RawMetadata::with_defaults(None, None, None),
        })
    }
}

#[async_trait]
impl MetadataSource for YouTubeDataClient {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, request: &LookupRequest) -> FetchOutcome {
        into_outcome(Self::NAME, self.lookup(&request.reference).await)
    }
}
