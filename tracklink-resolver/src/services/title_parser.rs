//! Title Parser
//!
//! Splits a raw YouTube title and channel name into track and artist fields.
//!
//! **Heuristics (in order):**
//! 1. Drop bracketed groups whose content is noise ("(Official Video)", "[Lyrics]");
//!    groups nest, so "(Official (HD) Video)" goes as a whole
//! 2. Drop a trailing "| ..." segment
//! 3. Collapse whitespace and trim stray separators
//! 4. "Artist - Track" split on the first separator outside a kept group,
//!    if both sides are non-empty
//! 5. Otherwise: whole title is the track, cleaned channel is the artist
//!
//! Total and deterministic: every input pair yields a result, and the same
//! pair always yields the same result.

use crate::types::{ParsedTrackInfo, UNKNOWN_ARTIST, UNKNOWN_TRACK};

/// Artist/track separators, longest first so ties prefer the longer form
const SEPARATORS: &[&str] = &[" -- ", " - ", " – ", " — ", " ~ "];

/// Bracket pairs that may wrap noise tokens
const BRACKETS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}'), ('【', '】')];

/// Noise matched anywhere inside a bracketed group
const NOISE_SUBSTRINGS: &[&str] = &[
    "official",
    "video",
    "audio",
    "lyric",
    "visuali",
    "remaster",
    "explicit",
    "full album",
    "color coded",
];

/// Noise matched only as a whole word inside a bracketed group
const NOISE_WORDS: &[&str] = &["mv", "m/v", "hd", "hq", "4k", "clean"];

/// Channel name decorations removed when the channel stands in for the artist
const CHANNEL_SUFFIXES: &[&str] = &[" - topic", "vevo", " official"];

/// Parse a raw title/channel pair into track and artist names
pub fn parse_track_info(title: &str, channel: &str) -> ParsedTrackInfo {
    let cleaned = clean_title(title);

    if let Some((artist, track)) = split_artist_track(&cleaned) {
        return ParsedTrackInfo {
            track_name: track,
            artist_name: artist,
        };
    }

    ParsedTrackInfo {
        track_name: or_default(cleaned, UNKNOWN_TRACK),
        artist_name: or_default(clean_channel(channel), UNKNOWN_ARTIST),
    }
}

/// Remove noise groups, trailing pipe segments and extra whitespace
fn clean_title(title: &str) -> String {
    let without_noise = strip_noise_groups(title);

    let head = match without_noise.split_once('|') {
        Some((head, _)) if !head.trim().is_empty() => head.to_string(),
        _ => without_noise,
    };

    trim_separators(&collapse_whitespace(&head))
}

/// Drop bracketed groups whose content is noise; keep all other groups
fn strip_noise_groups(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some((start, open, close)) = next_open_bracket(rest) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + open.len_utf8()..];

        match matching_close(after_open, open, close) {
            Some(end) => {
                let content = &after_open[..end];
                if !is_noise(content) {
                    out.push(open);
                    out.push_str(content);
                    out.push(close);
                }
                rest = &after_open[end + close.len_utf8()..];
            }
            None => {
                // Unbalanced bracket: keep the remainder verbatim
                out.push(open);
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Byte offset of the `close` that balances an already consumed `open`
fn matching_close(input: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;

    for (idx, c) in input.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            if depth == 0 {
                return Some(idx);
            }
            depth -= 1;
        }
    }

    None
}

/// Byte offset and bracket pair of the first opening bracket in `input`
fn next_open_bracket(input: &str) -> Option<(usize, char, char)> {
    input.char_indices().find_map(|(idx, c)| {
        BRACKETS
            .iter()
            .find(|(open, _)| *open == c)
            .map(|&(open, close)| (idx, open, close))
    })
}

fn is_noise(content: &str) -> bool {
    let lower = content.to_lowercase();

    if NOISE_SUBSTRINGS.iter().any(|noise| lower.contains(noise)) {
        return true;
    }

    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '/'))
        .any(|word| NOISE_WORDS.contains(&word))
}

/// Split "Artist - Track" at the earliest top-level separator
fn split_artist_track(title: &str) -> Option<(String, String)> {
    let (idx, sep) = top_level_separator(title)?;

    let artist = trim_separators(&title[..idx]);
    let track = strip_quotes(&trim_separators(&title[idx + sep.len()..]));

    if artist.is_empty() || track.is_empty() {
        return None;
    }

    Some((artist, track))
}

/// Earliest separator that is not inside a balanced bracket group
fn top_level_separator(title: &str) -> Option<(usize, &'static str)> {
    let mut idx = 0;

    while idx < title.len() {
        let rest = &title[idx..];
        if let Some(sep) = SEPARATORS.iter().find(|sep| rest.starts_with(**sep)) {
            return Some((idx, *sep));
        }

        let c = rest.chars().next()?;
        let after = idx + c.len_utf8();
        idx = match BRACKETS.iter().find(|(open, _)| *open == c) {
            Some(&(open, close)) => match matching_close(&title[after..], open, close) {
                Some(end) => after + end + close.len_utf8(),
                None => after,
            },
            None => after,
        };
    }

    None
}

/// Remove channel decorations such as "VEVO" or " - Topic"
fn clean_channel(channel: &str) -> String {
    let mut name = trim_separators(&collapse_whitespace(channel));

    loop {
        let lower = name.to_ascii_lowercase();
        let Some(suffix) = CHANNEL_SUFFIXES.iter().find(|s| lower.ends_with(*s)) else {
            break;
        };

        let stripped = trim_separators(&name[..name.len() - suffix.len()]);
        if stripped.is_empty() {
            break;
        }
        name = stripped;
    }

    name
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trim_separators(input: &str) -> String {
    input
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '–' | '—' | '~' | '|' | ':'))
        .to_string()
}

fn strip_quotes(input: &str) -> String {
    let trimmed = input.trim_matches(|c: char| matches!(c, '"' | '“' | '”'));
    if trimmed.trim().is_empty() {
        input.to_string()
    } else {
        trimmed.trim().to_string()
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
