// src/extractors/text.rs
use crate::extractors::keywords::AliasSet;
use crate::extractors::numeric::first_number;

/// Characters inspected after a keyword occurrence, keyword included.
pub const TEXT_WINDOW_CHARS: usize = 200;

/// Where a text search found its value. `offset` counts characters in the
/// lowercased text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextHit {
    pub alias: String,
    pub offset: usize,
    pub value: f64,
}

/// Fallback search over raw document text.
///
/// Aliases are tried in order; for each, only its first occurrence is
/// considered, and only the window of [`TEXT_WINDOW_CHARS`] characters that
/// starts there. The first alias yielding a number wins.
pub fn search(text: &str, aliases: &AliasSet) -> Option<TextHit> {
    if text.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();

    for alias in aliases.iter() {
        let Some(byte_idx) = lowered.find(alias) else {
            continue;
        };
        let window = window_at(&lowered, byte_idx);
        match first_number(window) {
            Some(value) => {
                let offset = lowered[..byte_idx].chars().count();
                tracing::trace!("Text match '{}' at char {} -> {}", alias, offset, value);
                return Some(TextHit { alias: alias.to_string(), offset, value });
            }
            None => {
                tracing::trace!("Text match '{}' has no number within {} chars", alias, TEXT_WINDOW_CHARS);
            }
        }
    }

    None
}

fn window_at(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    match rest.char_indices().nth(TEXT_WINDOW_CHARS) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}
