//! tracklink-resolver library interface
//!
//! Resolves YouTube video/playlist URLs into normalized track metadata with a
//! synthesized music-service link. Exposes the pipeline for the binary and
//! for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod orchestrator;
pub mod services;
pub mod sources;
pub mod types;

pub use crate::error::{ApiError, ApiResult, ResolveError};
pub use crate::orchestrator::{LookupMode, TrackResolver};
pub use crate::types::{MetadataTier, ResolvedTrack};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared resolver (stateless between requests)
    pub resolver: Arc<TrackResolver>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(resolver: Arc<TrackResolver>) -> Self {
        Self {
            resolver,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::resolve_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
