//! String and date helpers shared by the pipeline stages.

use chrono::{NaiveDate, NaiveDateTime};

/// Split text into sentences on Spanish sentence-ending punctuation.
///
/// A sentence boundary is a `.`, `!`, or `?` followed by whitespace.
/// Fragments of 10 characters or fewer after trimming are discarded.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.chars().count() > 10 {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// Build the article summary: the first 250 characters of the body, cut back
/// to the last full sentence when the prefix contains a period.
pub fn summarize_body(body: &str) -> String {
    let prefix: String = body.chars().take(250).collect();
    match prefix.rfind('.') {
        Some(idx) => format!("{}.", &prefix[..idx]),
        None => prefix,
    }
}

/// Reformat a provider date string into a human-readable form.
///
/// Accepts the narrow ISO shapes the provider emits (with or without a
/// `+00:00` offset or fractional seconds, or date-only) and renders them as
/// e.g. `March 15, 2024`. Anything else passes through unchanged.
pub fn format_publication_date(raw: &str) -> String {
    let cleaned = raw.replace("+00:00", "");

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return dt.format("%B %d, %Y").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d") {
        return date.format("%B %d, %Y").to_string();
    }

    raw.to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes with an ellipsis and byte
/// count indicator appended. The cut backs up to the nearest character
/// boundary so accented text never splits mid-character.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
