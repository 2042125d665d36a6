//! Resolution Orchestrator
//!
//! Runs the fallback chain for one URL:
//! 1. Extract the resource reference (the only step that can fail)
//! 2. Primary source; on `Found`, parse and synthesize
//! 3. Fallback source; on `Found`, parse and synthesize
//! 4. Degrade: fabricate a record from the resource id alone
//!
//! Both public entry points share one pipeline, parameterized by `LookupMode`.
//! Sources are called sequentially and never retried.

use crate::error::ResolveError;
use crate::extractors::{canonical_watch_url, extract_reference, extract_video_id};
use crate::services::{parse_track_info, IdSynthesizer};
use crate::types::{
    FetchOutcome, LookupRequest, MetadataSource, MetadataTier, RawMetadata, ResolvedTrack,
    ResourceReference, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Artist text hashed together with the id on the degrade tier
const DEGRADED_ID_ARTIST: &str = "YouTube";

const THUMBNAIL_HOST_URL: &str = "https://img.youtube.com/";

/// How the pipeline obtains its reference and which URL the fallback sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Video or playlist; fallback receives the caller's URL
    Full,
    /// `v=` parameter only; fallback receives the canonical watch URL
    VideoOnly,
}

impl LookupMode {
    fn lookup_request(&self, url: &str) -> Result<LookupRequest, ResolveError> {
        match self {
            LookupMode::Full => Ok(LookupRequest {
                reference: extract_reference(url)?,
                source_url: url.trim().to_string(),
            }),
            LookupMode::VideoOnly => {
                let reference = extract_video_id(url)?;
                let source_url = canonical_watch_url(&reference.id);
                Ok(LookupRequest {
                    reference,
                    source_url,
                })
            }
        }
    }
}

/// Public thumbnail URL used on the degrade tier
///
/// The id is percent-encoded as a single path segment.
pub fn degraded_thumbnail_url(id: &str) -> String {
    let built = Url::parse(THUMBNAIL_HOST_URL).ok().and_then(|mut url| {
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["vi", id, "maxresdefault.jpg"]);
        Some(url)
    });

    match built {
        Some(url) => url.to_string(),
        None => format!("{}vi/{}/maxresdefault.jpg", THUMBNAIL_HOST_URL, id),
    }
}

/// YouTube URL → `ResolvedTrack` resolver
///
/// Stateless between calls; share it behind an `Arc` across requests.
pub struct TrackResolver {
    primary: Arc<dyn MetadataSource>,
    fallback: Arc<dyn MetadataSource>,
    synthesizer: IdSynthesizer,
}

impl TrackResolver {
    pub fn new(
        primary: Arc<dyn MetadataSource>,
        fallback: Arc<dyn MetadataSource>,
        synthesizer: IdSynthesizer,
    ) -> Self {
        Self {
            primary,
            fallback,
            synthesizer,
        }
    }

    /// Resolve a video or playlist URL
    ///
    /// # Errors
    /// `ResolveError::InvalidUrl` when the URL is neither a watch nor a
    /// playlist URL. No network call is made in that case.
    pub async fn resolve(&self, url: &str) -> Result<ResolvedTrack, ResolveError> {
        self.run(url, LookupMode::Full).await
    }

    /// Resolve using only the `v=` video id of the URL
    pub async fn resolve_video_only(&self, url: &str) -> Result<ResolvedTrack, ResolveError> {
        self.run(url, LookupMode::VideoOnly).await
    }

    /// Shared pipeline behind both entry points
    pub async fn run(&self, url: &str, mode: LookupMode) -> Result<ResolvedTrack, ResolveError> {
        debug!(url = %url, mode = ?mode, "Resolving");

        let request = mode.lookup_request(url).map_err(|e| {
            warn!(url = %url, "Rejected URL: {}", e);
            e
        })?;

        if let FetchOutcome::Found(raw) = self.primary.fetch(&request).await {
            return Ok(self.track_from_metadata(raw, MetadataTier::Primary));
        }

        info!(
            id = %request.reference.id,
            source = self.fallback.name(),
            "Primary source empty, trying fallback"
        );

        if let FetchOutcome::Found(raw) = self.fallback.fetch(&request).await {
            return Ok(self.track_from_metadata(raw, MetadataTier::Fallback));
        }

        warn!(id = %request.reference.id, "All sources empty, degrading to id-only result");
        Ok(self.degraded(&request.reference))
    }

    fn track_from_metadata(&self, raw: RawMetadata, tier: MetadataTier) -> ResolvedTrack {
        let parsed = parse_track_info(&raw.title, &raw.channel_title);

        info!(
            tier = %tier,
            track = %parsed.track_name,
            artist = %parsed.artist_name,
            "Resolved track"
        );

        ResolvedTrack {
            service_url: self
                .synthesizer
                .track_url(&parsed.track_name, &parsed.artist_name),
            track_name: parsed.track_name,
            artist_name: parsed.artist_name,
            album_name: UNKNOWN_ALBUM.to_string(),
            thumbnail_url: raw.thumbnail_url,
            original_title: Some(raw.title),
            tier,
        }
    }

    fn degraded(&self, reference: &ResourceReference) -> ResolvedTrack {
        ResolvedTrack {
            service_url: self.synthesizer.track_url(&reference.id, DEGRADED_ID_ARTIST),
            track_name: format!("Track {}", reference.id),
            artist_name: UNKNOWN_ARTIST.to_string(),
            album_name: UNKNOWN_ALBUM.to_string(),
            thumbnail_url: degraded_thumbnail_url(&reference.id),
            original_title: None,
            tier: MetadataTier::Degraded,
        }
    }
}

// ============================================================================
// Mock Sources for Testing
// ============================================================================
