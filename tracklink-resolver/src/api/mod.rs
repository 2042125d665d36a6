//! HTTP API handlers for tracklink-resolver

pub mod health;
pub mod resolve;

pub use health::health_routes;
pub use resolve::resolve_routes;
