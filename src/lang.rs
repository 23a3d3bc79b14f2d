//! Spanish-language heuristics and the fixed translation dictionaries.
//!
//! Nothing in here is real language detection or machine translation. The
//! classifier counts common Spanish function words, and the "translations"
//! are reading hints assembled from small static dictionaries. Each concern
//! sits behind a single function so a real language-detection or translation
//! backend could replace it without touching callers.

use crate::models::VocabularyEntry;
use once_cell::sync::Lazy;

/// Indicator words the collector counts when deciding whether a provider
/// result is Spanish. A result needs at least [`COLLECTOR_THRESHOLD`] of
/// these in its combined title and body.
const COLLECTOR_INDICATORS: [&str; 14] = [
    "el", "la", "de", "en", "que", "los", "las", "un", "una", "por", "para", "con", "su", "al",
];

/// Indicator words the transformer counts when ranking articles for
/// selection. Threshold is [`READER_THRESHOLD`].
const READER_INDICATORS: [&str; 13] = [
    "el", "la", "de", "en", "que", "los", "las", "del", "un", "una", "por", "para", "con",
];

const COLLECTOR_THRESHOLD: usize = 3;
const READER_THRESHOLD: usize = 2;

/// Emitted when no glossary phrase matches a piece of text.
const FALLBACK_HINT: &str = "Practice reading this Spanish text";

/// Context string attached to every vocabulary word found in an article.
const VOCAB_CONTEXT: &str = "Word used in context of the article";

/// Phrase-to-gloss dictionary used to build English reading hints.
/// Matched longest-first so `últimas noticias` wins over `noticias`.
static GLOSSARY: [(&str, &str); 28] = [
    ("últimas noticias", "latest news"),
    ("noticias", "news"),
    ("actualidad", "current events"),
    ("política", "politics"),
    ("economía", "economy"),
    ("gobierno", "government"),
    ("presidente", "president"),
    ("país", "country"),
    ("desarrollo", "development"),
    ("seguridad", "security"),
    ("ciudadanos", "citizens"),
    ("elecciones", "elections"),
    ("ley", "law"),
    ("reforma", "reform"),
    ("crisis", "crisis"),
    ("pobreza", "poverty"),
    ("hoy", "today"),
    ("ayer", "yesterday"),
    ("según", "according to"),
    ("durante", "during"),
    ("después", "after"),
    ("antes", "before"),
    ("más alta", "highest"),
    ("cifra", "figure/number"),
    ("alarmante", "alarming"),
    ("supera", "exceeds"),
    ("décadas", "decades"),
    ("últimas", "latest/recent"),
];

static GLOSSARY_BY_LENGTH: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    let mut entries = GLOSSARY.to_vec();
    // Stable sort keeps dictionary order among equal-length phrases.
    entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
    entries
});

/// Vocabulary candidates scanned against each article's title and body.
static VOCABULARY: [(&str, &str); 16] = [
    ("gobierno", "government"),
    ("presidente", "president"),
    ("economía", "economy"),
    ("política", "politics"),
    ("ciudadanos", "citizens"),
    ("país", "country"),
    ("desarrollo", "development"),
    ("seguridad", "security"),
    ("elecciones", "elections"),
    ("proyecto", "project"),
    ("ley", "law"),
    ("reforma", "reform"),
    ("inversión", "investment"),
    ("crecimiento", "growth"),
    ("migración", "migration"),
    ("inmigración", "immigration"),
];

/// Count how many distinct indicator words appear in `text`.
///
/// Words are matched with surrounding spaces against the padded, lowercased
/// text, so `el` does not fire inside `cielo`.
fn indicator_count(text: &str, indicators: &[&str]) -> usize {
    let padded = format!(" {} ", text.to_lowercase());
    indicators
        .iter()
        .filter(|word| padded.contains(&format!(" {word} ")))
        .count()
}

/// Collector-side filter: does this provider result carry enough Spanish
/// function words to keep?
pub fn passes_collector_filter(text: &str) -> bool {
    indicator_count(text, &COLLECTOR_INDICATORS) >= COLLECTOR_THRESHOLD
}

/// Transformer-side classifier used to prefer Spanish articles.
pub fn looks_spanish(text: &str) -> bool {
    indicator_count(text, &READER_INDICATORS) >= READER_THRESHOLD
}

/// Build an English reading hint for a piece of Spanish text.
///
/// Scans the glossary longest-phrase-first, collecting up to three
/// `"phrase" = gloss` pairs joined with semicolons. A phrase already present
/// in an earlier hint is skipped. Returns a fixed placeholder when nothing
/// matches.
pub fn gloss_hint(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut hints: Vec<String> = Vec::new();

    for (spanish, english) in GLOSSARY_BY_LENGTH.iter() {
        if lower.contains(spanish) && !hints.join(" ").contains(spanish) {
            hints.push(format!("\"{spanish}\" = {english}"));
            if hints.len() >= 3 {
                break;
            }
        }
    }

    if hints.is_empty() {
        FALLBACK_HINT.to_string()
    } else {
        hints.join("; ")
    }
}

/// Collect vocabulary words present in `text`.
///
/// Scans the candidate list in dictionary order, keeping up to five hits,
/// then pads with a fixed `noticias` entry until at least three exist.
pub fn extract_vocabulary(text: &str) -> Vec<VocabularyEntry> {
    let lower = text.to_lowercase();
    let mut found: Vec<VocabularyEntry> = Vec::new();

    for (spanish, english) in VOCABULARY.iter() {
        if lower.contains(spanish) {
            found.push(VocabularyEntry {
                spanish: (*spanish).to_string(),
                english: (*english).to_string(),
                context: VOCAB_CONTEXT.to_string(),
            });
            if found.len() >= 5 {
                break;
            }
        }
    }

    while found.len() < 3 {
        found.push(VocabularyEntry {
            spanish: "noticias".to_string(),
            english: "news".to_string(),
            context: "Current events and news articles".to_string(),
        });
    }

    found.truncate(5);
    found
}
