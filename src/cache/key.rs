// Cache key derivation
// Author: kelexine (https://github.com/kelexine)

use crate::models::Payload;
use sha2::{Digest, Sha256};

/// Upper bound on the length component of a content key.
const LENGTH_CAP: usize = 100;

/// Characters of source text that identify a translation.
const TRANSLATION_PREFIX_CHARS: usize = 50;

/// Derive the cache key for a generation payload.
///
/// Format: `{model}:{sha256(text)}:{min(char_count, 100)}`. The hash covers
/// the full text, so the capped length only adds a coarse discriminator.
pub fn compute_key(payload: &Payload, model: &str) -> String {
    let text = payload.text();
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());

    format!(
        "{}:{:x}:{}",
        model,
        hasher.finalize(),
        text.chars().count().min(LENGTH_CAP)
    )
}

/// Derive the cache key for a translation.
///
/// Only the first 50 characters of `text` take part, so two long texts
/// sharing that prefix and language pair resolve to the same entry.
pub fn translation_key(model: &str, source_lang: &str, target_lang: &str, text: &str) -> String {
    let prefix: String = text.chars().take(TRANSLATION_PREFIX_CHARS).collect();
    format!("translate:{}:{}:{}:{}", model, source_lang, target_lang, prefix)
}
