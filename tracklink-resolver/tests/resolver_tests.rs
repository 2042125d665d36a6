//! End-to-end resolution tests against a local stub upstream
//!
//! The stub serves both the YouTube Data API list endpoints and the oEmbed
//! endpoint so the real HTTP sources are exercised.

mod helpers;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use helpers::{spawn_stub, stub_resolver, stub_settings, TEST_API_KEY};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracklink_resolver::services::synthesize_id;
use tracklink_resolver::{MetadataTier, ResolveError};

type Params = Query<HashMap<String, String>>;

fn video_item(title: &str, channel: &str) -> serde_json::Value {
    json!({
        "kind": "youtube#videoListResponse",
        "items": [{
            "id": "abc",
            "snippet": {
                "title": title,
                "channelTitle": channel,
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/vi/abc/default.jpg" },
                    "medium": { "url": "https://i.ytimg.com/vi/abc/mqdefault.jpg" }
                }
            }
        }]
    })
}

/// Scenario 1: primary hit, dash-separated artist preferred over channel
#[tokio::test]
async fn test_primary_metadata_parsed() {
    let router = Router::new().route(
        "/youtube/v3/videos",
        get(|Query(params): Params| async move {
            let expected = params.get("part").map(String::as_str) == Some("snippet")
                && params.get("id").map(String::as_str) == Some("abc")
                && params.get("key").map(String::as_str) == Some(TEST_API_KEY);
            if !expected {
                return StatusCode::BAD_REQUEST.into_response();
            }
            Json(video_item("Artist - Song (Official Video)", "ArtistVEVO")).into_response()
        }),
    );
    let base = spawn_stub(router).await;

    let track = stub_resolver(&base)
        .resolve("https://www.youtube.com/watch?v=abc")
        .await
        .unwrap();

    assert_eq!(track.track_name, "Song");
    assert_eq!(track.artist_name, "Artist");
    assert_eq!(track.album_name, "Unknown Album");
    assert_eq!(track.thumbnail_url, "https://i.ytimg.com/vi/abc/mqdefault.jpg");
    assert_eq!(
        track.service_url,
        format!("https://open.spotify.com/track/{}", synthesize_id("Song", "Artist"))
    );
    assert_eq!(track.tier, MetadataTier::Primary);
}

/// Scenario 2: primary returns zero items, oEmbed supplies the data
#[tokio::test]
async fn test_fallback_when_primary_has_no_items() {
    let seen_urls = Arc::new(Mutex::new(Vec::<String>::new()));
    let recorder = seen_urls.clone();

    let router = Router::new()
        .route(
            "/youtube/v3/videos",
            get(|| async { Json(json!({ "items": [] })) }),
        )
        .route(
            "/oembed",
            get(move |Query(params): Params| {
                let recorder = recorder.clone();
                async move {
                    recorder
                        .lock()
                        .unwrap()
                        .push(params.get("url").cloned().unwrap_or_default());
                    assert_eq!(params.get("format").map(String::as_str), Some("json"));
                    Json(json!({
                        "title": "Some Song",
                        "author_name": "Some Channel",
                        "thumbnail_url": "https://i.ytimg.com/vi/abc/hqdefault.jpg"
                    }))
                }
            }),
        );
    let base = spawn_stub(router).await;

    let url = "https://www.youtube.com/watch?v=abc&t=42";
    let track = stub_resolver(&base).resolve(url).await.unwrap();

    assert_eq!(track.track_name, "Some Song");
    assert_eq!(track.artist_name, "Some Channel");
    assert_eq!(track.thumbnail_url, "https://i.ytimg.com/vi/abc/hqdefault.jpg");
    assert_eq!(track.original_title.as_deref(), Some("Some Song"));
    assert_eq!(track.tier, MetadataTier::Fallback);
    assert_eq!(seen_urls.lock().unwrap().as_slice(), [url.to_string()]);
}

/// Scenario 3: both tiers fail, result degrades to the video id
#[tokio::test]
async fn test_degrade_when_both_tiers_fail() {
    let router = Router::new()
        .route(
            "/youtube/v3/videos",
            get(|| async { (StatusCode::FORBIDDEN, "quota exceeded") }),
        )
        .route(
            "/oembed",
            get(|| async { (StatusCode::NOT_FOUND, "Not Found") }),
        );
    let base = spawn_stub(router).await;

    let track = stub_resolver(&base)
        .resolve("https://www.youtube.com/watch?v=abc123")
        .await
        .unwrap();

    assert_eq!(track.track_name, "Track abc123");
    assert_eq!(track.artist_name, "Unknown Artist");
    assert_eq!(
        track.thumbnail_url,
        "https://img.youtube.com/vi/abc123/maxresdefault.jpg"
    );
    assert_eq!(
        track.service_url,
        format!(
            "https://open.spotify.com/track/{}",
            synthesize_id("abc123", "YouTube")
        )
    );
    assert_eq!(track.tier, MetadataTier::Degraded);
}

#[tokio::test]
async fn test_undecodable_oembed_body_degrades() {
    let router = Router::new()
        .route("/youtube/v3/videos", get(|| async { Json(json!({ "items": [] })) }))
        .route("/oembed", get(|| async { "<html>not json</html>" }));
    let base = spawn_stub(router).await;

    let track = stub_resolver(&base)
        .resolve("https://www.youtube.com/watch?v=zzz")
        .await
        .unwrap();

    assert_eq!(track.tier, MetadataTier::Degraded);
    assert_eq!(track.track_name, "Track zzz");
}

#[tokio::test]
async fn test_invalid_url_makes_no_network_calls() {
    let hits = Arc::new(AtomicUsize::new(0));
    let (videos_hits, oembed_hits) = (hits.clone(), hits.clone());

    let router = Router::new()
        .route(
            "/youtube/v3/videos",
            get(move || {
                videos_hits.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({ "items": [] })) }
            }),
        )
        .route(
            "/oembed",
            get(move || {
                oembed_hits.fetch_add(1, Ordering::SeqCst);
                async { StatusCode::NOT_FOUND }
            }),
        );
    let base = spawn_stub(router).await;

    let result = stub_resolver(&base).resolve("https://example.com/foo").await;

    assert_eq!(
        result,
        Err(ResolveError::InvalidUrl("https://example.com/foo".to_string()))
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_playlist_uses_playlists_endpoint() {
    let router = Router::new().route(
        "/youtube/v3/playlists",
        get(|Query(params): Params| async move {
            assert_eq!(params.get("id").map(String::as_str), Some("PL42"));
            Json(json!({
                "items": [{
                    "snippet": {
                        "title": "Road Trip Mix",
                        "channelTitle": "Curator - Topic",
                        "thumbnails": { "default": { "url": "https://i.ytimg.com/pl/default.jpg" } }
                    }
                }]
            }))
        }),
    );
    let base = spawn_stub(router).await;

    let track = stub_resolver(&base)
        .resolve("https://www.youtube.com/playlist?list=PL42")
        .await
        .unwrap();

    assert_eq!(track.track_name, "Road Trip Mix");
    assert_eq!(track.artist_name, "Curator");
    assert_eq!(track.thumbnail_url, "https://i.ytimg.com/pl/default.jpg");
    assert_eq!(track.tier, MetadataTier::Primary);
}

#[tokio::test]
async fn test_missing_api_key_skips_primary() {
    let primary_hits = Arc::new(AtomicUsize::new(0));
    let counter = primary_hits.clone();

    let router = Router::new()
        .route(
            "/youtube/v3/videos",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Json(video_item("Wrong - Tier", "x")) }
            }),
        )
        .route(
            "/oembed",
            get(|| async { Json(json!({ "title": "Band - Tune", "author_name": "Label" })) }),
        );
    let base = spawn_stub(router).await;

    let resolver = stub_settings(&base, None).build_resolver().unwrap();
    let track = resolver
        .resolve("https://www.youtube.com/watch?v=abc")
        .await
        .unwrap();

    assert_eq!(primary_hits.load(Ordering::SeqCst), 0);
    assert_eq!(track.track_name, "Tune");
    assert_eq!(track.artist_name, "Band");
    assert_eq!(track.thumbnail_url, "");
    assert_eq!(track.tier, MetadataTier::Fallback);
}

#[tokio::test]
async fn test_video_only_sends_canonical_url_to_oembed() {
    let seen_urls = Arc::new(Mutex::new(Vec::<String>::new()));
    let recorder = seen_urls.clone();

    let router = Router::new()
        .route("/youtube/v3/videos", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/oembed",
            get(move |Query(params): Params| {
                let recorder = recorder.clone();
                async move {
                    recorder
                        .lock()
                        .unwrap()
                        .push(params.get("url").cloned().unwrap_or_default());
                    Json(json!({ "title": "Song", "author_name": "Singer" }))
                }
            }),
        );
    let base = spawn_stub(router).await;

    let track = stub_resolver(&base)
        .resolve_video_only("https://music.youtube.com/watch?v=vid1&list=RDAMVM")
        .await
        .unwrap();

    assert_eq!(track.track_name, "Song");
    assert_eq!(track.artist_name, "Singer");
    assert_eq!(
        seen_urls.lock().unwrap().as_slice(),
        ["https://www.youtube.com/watch?v=vid1".to_string()]
    );
}
