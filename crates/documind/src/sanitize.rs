//! Helpers for keeping document contents out of logs and span fields.
//!
//! Documents can hold anything the user uploaded, so spans only ever see
//! their length and a short fingerprint.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Describes a text by size and fingerprint only, e.g. `<1532 chars #3f2a9c01d4e5b6a7>`.
pub fn redact_text(text: &str) -> String {
    format!("<{} chars #{}>", text.chars().count(), hash_text(text))
}

/// Short deterministic hash for correlating runs over the same document.
pub fn hash_text(text: &str) -> String {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Cuts `text` to at most `max_chars` characters, never splitting a char.
/// Returns the input unchanged when it already fits.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Error bodies from the remote services are capped before they reach a log line.
pub fn truncate_error_body(body: &str) -> String {
    const MAX_ERROR_BODY_CHARS: usize = 200;
    let cut = truncate_chars(body, MAX_ERROR_BODY_CHARS);
    if cut.len() < body.len() {
        format!("{}... (truncated)", cut)
    } else {
        body.to_string()
    }
}
