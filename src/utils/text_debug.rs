// src/utils/text_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use regex::Regex;
use crate::extractors::keywords::{AliasSet, KeywordTable};
use crate::utils::error::AppError;

/// Renders document text as HTML with highlighted spans.
/// Highlights are `(start, end, quantity)` byte ranges; overlapping ranges after the first are dropped.
pub fn render_debug_html(text: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str("mark { background-color: #FFFF00; }\n");
    debug_html.push_str("pre { white-space: pre-wrap; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n<pre>");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| (h.0, h.1)); // Sort by position

    for (start, end, quantity) in sorted_highlights {
        if start < last_pos {
            continue;
        }
        debug_html.push_str(&html_escape::encode_text(&text[last_pos..start]));
        debug_html.push_str(&format!(
            "<mark title=\"{}: {}-{}\">",
            html_escape::encode_double_quoted_attribute(quantity),
            start,
            end
        ));
        debug_html.push_str(&html_escape::encode_text(&text[start..end]));
        debug_html.push_str("</mark>");
        last_pos = end;
    }

    if last_pos < text.len() {
        debug_html.push_str(&html_escape::encode_text(&text[last_pos..]));
    }

    debug_html.push_str("</pre>\n</body>\n</html>");
    debug_html
}

/// Saves a text snippet to a file with debug highlights
pub fn save_debug_html(text: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;
    file.write_all(render_debug_html(text, highlights).as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Highlights every occurrence of every alias in `text` and saves the result.
/// Returns the number of highlighted occurrences.
pub fn create_debug_html(text: &str, filename: &Path, keywords: &KeywordTable) -> Result<usize, AppError> {
    let mut highlights = Vec::new();

    for (quantity, aliases) in keywords.iter() {
        let pattern = alias_pattern(aliases);
        let re = Regex::new(&pattern).map_err(|e| {
            AppError::Config(format!("Invalid highlight pattern for '{}': {}", quantity, e))
        })?;

        for mat in re.find_iter(text) {
            highlights.push((mat.start(), mat.end(), quantity));
        }
    }

    save_debug_html(text, filename, &highlights)?;
    Ok(highlights.len())
}

// Case-insensitive alternation of all aliases, any whitespace run between words.
fn alias_pattern(aliases: &AliasSet) -> String {
    let alternatives: Vec<String> = aliases
        .iter()
        .map(|alias| {
            alias
                .split(' ')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    format!("(?i)(?:{})", alternatives.join("|"))
}
