//! oEmbed client (fallback tier)
//!
//! Unauthenticated `GET {endpoint}?url={source_url}&format=json` returning
//! `title`, `author_name` and `thumbnail_url`.

use super::{http_client, into_outcome};
use crate::error::UpstreamError;
use crate::types::{FetchOutcome, LookupRequest, MetadataSource, RawMetadata};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
    thumbnail_url: Option<String>,
}

impl From<OEmbedResponse> for RawMetadata {
    fn from(body: OEmbedResponse) -> Self {
        RawMetadata::with_defaults(body.title, body.author_name, body.thumbnail_url)
    }
}

/// Public oEmbed endpoint client
pub struct OEmbedClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl OEmbedClient {
    pub const NAME: &'static str = "oembed";

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            http_client: http_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    /// Look up embed metadata for a raw YouTube URL
    pub async fn lookup(&self, source_url: &str) -> Result<RawMetadata, UpstreamError> {
        debug!(endpoint = %self.endpoint, url = %source_url, "Querying oEmbed endpoint");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("url", source_url), ("format", "json")])
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        Ok(body.into())
    }
}

#[async_trait]
impl MetadataSource for OEmbedClient {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, request: &LookupRequest) -> FetchOutcome {
        into_outcome(Self::NAME, self.lookup(&request.source_url).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_defaults() {
        let body: OEmbedResponse = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        let raw: RawMetadata = body.into();
        assert_eq!(raw.title, "Unknown Track");
        assert_eq!(raw.channel_title, "Unknown Artist");
        assert_eq!(raw.thumbnail_url, "");
    }

    #[test]
    fn test_response_fields() {
        let body: OEmbedResponse = serde_json::from_str(
            r#"{"title": "Some Song", "author_name": "Some Channel",
                "thumbnail_url": "https://i.ytimg.com/vi/x/hqdefault.jpg",
                "provider_name": "YouTube"}"#,
        )
        .unwrap();
        let raw: RawMetadata = body.into();
        assert_eq!(raw.title, "Some Song");
        assert_eq!(raw.channel_title, "Some Channel");
        assert_eq!(raw.thumbnail_url, "https://i.ytimg.com/vi/x/hqdefault.jpg");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let client = OEmbedClient::new("http://127.0.0.1:9/oembed", Duration::from_secs(2)).unwrap();
        let result = client.lookup("https://www.youtube.com/watch?v=abc").await;
        assert!(matches!(result, Err(UpstreamError::Network(_))));
    }
}
