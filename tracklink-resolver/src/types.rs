//! Core Types and Trait Definitions for tracklink-resolver
//!
//! Data flows through the pipeline as:
//! `ResourceReference` → `FetchOutcome` (`RawMetadata` or empty) →
//! `ParsedTrackInfo` → `ResolvedTrack`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a source returns no title
pub const UNKNOWN_TRACK: &str = "Unknown Track";

/// Artist used when a source returns no channel/author
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Album placeholder (no album data source exists)
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

// ============================================================================
// Resource Reference
// ============================================================================

/// Kind of YouTube resource a URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Playlist,
}

impl ResourceKind {
    /// YouTube Data API list endpoint for this kind
    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Video => "videos",
            ResourceKind::Playlist => "playlists",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::Playlist => write!(f, "playlist"),
        }
    }
}

/// (id, kind) pair identifying a YouTube video or playlist
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceReference {
    pub id: String,
    pub kind: ResourceKind,
}

impl ResourceReference {
    pub fn video(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ResourceKind::Video,
        }
    }

    pub fn playlist(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ResourceKind::Playlist,
        }
    }
}

/// Everything a metadata source may need for one lookup
///
/// The primary source keys on `reference`; the oEmbed fallback keys on
/// `source_url`.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub reference: ResourceReference,
    pub source_url: String,
}

// ============================================================================
// Raw Metadata
// ============================================================================

/// Unparsed title/channel/thumbnail as returned by a data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMetadata {
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
}

impl RawMetadata {
    /// Build raw metadata applying the shared defaulting rules
    ///
    /// Absent or empty title → "Unknown Track", absent or empty channel →
    /// "Unknown Artist", absent thumbnail → "".
    pub fn with_defaults(
        title: Option<String>,
        channel_title: Option<String>,
        thumbnail_url: Option<String>,
    ) -> Self {
        Self {
            title: non_empty(title).unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
            channel_title: non_empty(channel_title).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            thumbnail_url: non_empty(thumbnail_url).unwrap_or_default(),
        }
    }
}

/// Treat empty strings the same as missing values
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Result of a single metadata source attempt
///
/// `Empty` covers every recoverable upstream failure (network error,
/// non-success status, zero items, missing credential).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(RawMetadata),
    Empty,
}

// ============================================================================
// Parsed / Resolved Track
// ============================================================================

/// Track and artist derived from a raw title/channel pair
///
/// Only constructed by `services::title_parser`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTrackInfo {
    pub track_name: String,
    pub artist_name: String,
}

/// Which stage of the fallback chain produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataTier {
    Primary,
    Fallback,
    Degraded,
}

impl fmt::Display for MetadataTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataTier::Primary => write!(f, "primary"),
            MetadataTier::Fallback => write!(f, "fallback"),
            MetadataTier::Degraded => write!(f, "degraded"),
        }
    }
}

/// Final resolution record returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTrack {
    /// Synthesized music-service link (`{base}/track/{id}`)
    pub service_url: String,
    pub track_name: String,
    pub artist_name: String,
    /// Always "Unknown Album"
    pub album_name: String,
    pub thumbnail_url: String,
    /// Raw upstream title (absent on the degrade tier)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub original_title: Option<String>,
    pub tier: MetadataTier,
}

// ============================================================================
// Metadata Source Trait
// ============================================================================

/// A single tier of the metadata fetch chain
///
/// Implementations perform at most one outbound call and never fail: every
/// upstream problem is logged and reported as `FetchOutcome::Empty`.
///
/// # Example
/// ```rust,ignore
/// use tracklink_resolver::types::{FetchOutcome, LookupRequest, MetadataSource};
///
/// struct Silent;
///
/// #[async_trait::async_trait]
/// impl MetadataSource for Silent {
///     fn name(&self) -> &'static str { "silent" }
///     async fn fetch(&self, _req: &LookupRequest) -> FetchOutcome { FetchOutcome::Empty }
/// }
/// ```
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Source name for log provenance
    fn name(&self) -> &'static str;

    /// Fetch raw metadata for a lookup request
    async fn fetch(&self, request: &LookupRequest) -> FetchOutcome;
}
