//! Pure text services used by the resolution pipeline

pub mod id_synthesizer;
pub mod title_parser;

pub use id_synthesizer::{synthesize_id, IdSynthesizer};
pub use title_parser::parse_track_info;
