//! Resolution endpoints
//!
//! - `POST /api/resolve` - video or playlist URL
//! - `POST /api/convert` - video id (`v=`) only

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::orchestrator::LookupMode;
use crate::types::ResolvedTrack;
use crate::AppState;

/// Request body for both endpoints
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub url: String,
}

/// POST /api/resolve
pub async fn resolve_track(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> ApiResult<Json<ResolvedTrack>> {
    run(&state, &request.url, LookupMode::Full).await
}

/// POST /api/convert
pub async fn convert_video(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> ApiResult<Json<ResolvedTrack>> {
    run(&state, &request.url, LookupMode::VideoOnly).await
}

async fn run(state: &AppState, url: &str, mode: LookupMode) -> ApiResult<Json<ResolvedTrack>> {
    let track = state.resolver.run(url, mode).await?;
    Ok(Json(track))
}

/// Build resolution routes
pub fn resolve_routes() -> Router<AppState> {
    Router::new()
        .route("/api/resolve", post(resolve_track))
        .route("/api/convert", post(convert_video))
}
