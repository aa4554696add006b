// src/extractors/numeric.rs
use once_cell::sync::Lazy;
use regex::Regex;

// Digits, optionally grouped or split by '.' or ','. No sign, no exponent.
static NUMBER_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]+(?:[.,][0-9]+)*").expect("Failed to compile NUMBER_LITERAL_RE")
});

/// Parses a table cell rendering: commas are stripped as thousands
/// separators before the first literal is located.
pub fn parse_cell_number(rendered: &str) -> Option<f64> {
    let stripped = rendered.replace(',', "");
    first_number(&stripped)
}

/// Finds the first numeric literal in `text` and parses it.
pub fn first_number(text: &str) -> Option<f64> {
    let literal = NUMBER_LITERAL_RE.find(text)?;
    parse_literal(literal.as_str())
}

/// Standard reading first (commas as grouping), then the comma-as-decimal
/// reading (dots as grouping, comma as the decimal point).
fn parse_literal(literal: &str) -> Option<f64> {
    // Digit runs too long for f64 overflow to infinity; those are not figures.
    literal
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .or_else(|| {
            literal
                .replace('.', "")
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        })
}
