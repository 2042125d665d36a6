//! Deterministic ID Synthesizer
//!
//! Produces a music-service-looking track id from free text. The id is a
//! SHA-256 digest of the normalized inputs, truncated to 128 bits and written
//! as exactly 22 base62 digits. No randomness or clock input, so the same text
//! always maps to the same id across processes.

use sha2::{Digest, Sha256};
use tracklink_common::config::DEFAULT_SERVICE_BASE_URL;

/// Length of every synthesized id
pub const ID_LENGTH: usize = 22;

const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Separates track and artist in the hash input
const FIELD_SEPARATOR: char = '\u{1f}';

/// Synthesize a 22-character base62 id from track and artist text
///
/// Inputs are trimmed, lowercased and whitespace-collapsed first, so
/// "Song" / " song " hash the same.
pub fn synthesize_id(track: &str, artist: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(track).as_bytes());
    hasher.update(FIELD_SEPARATOR.to_string().as_bytes());
    hasher.update(normalize(artist).as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 16];
    prefix.copy_from_slice(&digest[..16]);

    encode_base62(u128::from_be_bytes(prefix))
}

/// Fixed-width base62 encoding (62^22 > 2^128, so 22 digits always suffice)
fn encode_base62(mut value: u128) -> String {
    let mut digits = [b'0'; ID_LENGTH];
    for slot in digits.iter_mut().rev() {
        *slot = BASE62_ALPHABET[(value % 62) as usize];
        value /= 62;
    }
    digits.iter().map(|&b| b as char).collect()
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Builds synthesized track links under a service base URL
#[derive(Debug, Clone)]
pub struct IdSynthesizer {
    service_base: String,
}

impl IdSynthesizer {
    pub fn new(service_base: impl Into<String>) -> Self {
        let service_base: String = service_base.into();
        Self {
            service_base: service_base.trim_end_matches('/').to_string(),
        }
    }

    /// `{service_base}/track/{id}` for the given text pair
    pub fn track_url(&self, track: &str, artist: &str) -> String {
        format!("{}/track/{}", self.service_base, synthesize_id(track, artist))
    }
}

impl Default for IdSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_BASE_URL)
    }
}
