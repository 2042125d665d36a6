//! Identifier Extractor
//!
//! Classifies a YouTube URL and pulls out the resource id. Two shapes are
//! recognized: `/watch?v={id}` (video) and `/playlist?list={id}` (playlist).
//! The host is not inspected.

use crate::error::ResolveError;
use crate::types::ResourceReference;
use tracing::debug;
use url::Url;

/// Base used to rebuild a watch URL from a bare video id
const WATCH_URL_BASE: &str = "https://www.youtube.com/watch";

/// Extract a video or playlist reference from a URL
///
/// # Errors
/// `ResolveError::InvalidUrl` when the string is not a URL, the path is
/// neither `/watch` nor `/playlist`, or the required query parameter is
/// missing or empty.
pub fn extract_reference(input: &str) -> Result<ResourceReference, ResolveError> {
    let url = parse_url(input)?;

    let reference = match url.path() {
        "/watch" => query_value(&url, "v").map(ResourceReference::video),
        "/playlist" => query_value(&url, "list").map(ResourceReference::playlist),
        _ => None,
    }
    .ok_or_else(|| ResolveError::InvalidUrl(input.to_string()))?;

    debug!(kind = %reference.kind, id = %reference.id, "Resource id extracted");
    Ok(reference)
}

/// Extract a video reference keyed only by the `v` query parameter
///
/// Any path is accepted as long as a non-empty `v` parameter is present;
/// playlists are not recognized here. Pasted links without a scheme
/// (`www.youtube.com/watch?v=...`) are read as `https://`.
pub fn extract_video_id(input: &str) -> Result<ResourceReference, ResolveError> {
    let url = match Url::parse(input.trim()) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            parse_url(&format!("https://{}", input.trim()))
                .map_err(|_| ResolveError::InvalidUrl(input.to_string()))?
        }
        Err(_) => parse_url(input)?,
    };

    let reference = query_value(&url, "v")
        .map(ResourceReference::video)
        .ok_or_else(|| ResolveError::InvalidUrl(input.to_string()))?;

    debug!(id = %reference.id, "Video id extracted");
    Ok(reference)
}

/// Canonical watch URL for a video id
pub fn canonical_watch_url(video_id: &str) -> String {
    match Url::parse_with_params(WATCH_URL_BASE, &[("v", video_id)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}?v={}", WATCH_URL_BASE, video_id),
    }
}

fn parse_url(input: &str) -> Result<Url, ResolveError> {
    Url::parse(input.trim()).map_err(|e| {
        debug!(input = %input, error = %e, "URL failed to parse");
        ResolveError::InvalidUrl(input.to_string())
    })
}

/// First non-empty value of a query parameter
fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.trim().to_string())
        .find(|v| !v.is_empty())
}
