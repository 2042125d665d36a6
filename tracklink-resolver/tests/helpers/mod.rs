//! Test helpers: local stub upstream server and resolver wiring

#![allow(dead_code)]

use axum::Router;
use std::time::Duration;
use tracklink_resolver::config::ResolverSettings;
use tracklink_resolver::TrackResolver;

pub const TEST_API_KEY: &str = "test-key";

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Settings pointing both tiers at a stub server
pub fn stub_settings(base_url: &str, api_key: Option<&str>) -> ResolverSettings {
    ResolverSettings {
        port: 0,
        youtube_api_key: api_key.map(str::to_string),
        youtube_api_base_url: format!("{}/youtube/v3", base_url),
        oembed_endpoint: format!("{}/oembed", base_url),
        service_base_url: "https://open.spotify.com".to_string(),
        request_timeout: Duration::from_secs(5),
    }
}

/// Resolver wired to a stub server with the test API key
pub fn stub_resolver(base_url: &str) -> TrackResolver {
    stub_settings(base_url, Some(TEST_API_KEY))
        .build_resolver()
        .unwrap()
}
