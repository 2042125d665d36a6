//! Input extractors
//!
//! Turn caller input into a `ResourceReference` before any network call.

pub mod url_extractor;

pub use url_extractor::{canonical_watch_url, extract_reference, extract_video_id};
