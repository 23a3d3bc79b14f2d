//! Data models for the raw news archive and the bilingual reader feed.
//!
//! Two JSON documents flow through the pipeline:
//! - [`NewsArchive`]: raw provider results grouped per country, written by
//!   `noticiero fetch` and read back by `noticiero transform`
//! - [`ReaderFeed`]: the bilingual study material consumed by the NewsReader
//!   front-end, keyed by country name
//!
//! The reader-side structs serialize with camelCase field names (`fullText`,
//! `keyVocabulary`, `comprehensionQuestions`) to match the schema the
//! front-end expects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Spanish-speaking country the collector fetches headlines for.
///
/// The flag glyph is display-only metadata carried through to the archive.
#[derive(Debug, Clone, Copy)]
pub struct Country {
    /// English country name, used as the map key in both output files.
    pub name: &'static str,
    /// Flag emoji shown next to the country in the front-end.
    pub flag: &'static str,
}

/// The fixed set of countries covered by every collector run.
pub const COUNTRIES: [Country; 10] = [
    Country { name: "Argentina", flag: "🇦🇷" },
    Country { name: "Chile", flag: "🇨🇱" },
    Country { name: "Colombia", flag: "🇨🇴" },
    Country { name: "Costa Rica", flag: "🇨🇷" },
    Country { name: "Dominican Republic", flag: "🇩🇴" },
    Country { name: "Ecuador", flag: "🇪🇨" },
    Country { name: "Mexico", flag: "🇲🇽" },
    Country { name: "Panama", flag: "🇵🇦" },
    Country { name: "Paraguay", flag: "🇵🇾" },
    Country { name: "Peru", flag: "🇵🇪" },
];

/// A raw news article as returned by the search provider.
///
/// The provider guarantees no schema beyond key presence; every field
/// defaults to an empty string when absent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Body snippet, usually truncated by the provider.
    #[serde(default)]
    pub body: String,
    /// Publication timestamp as an ISO-like string, e.g.
    /// `2024-03-15T10:00:00+00:00`. Carried through opaquely.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub source: String,
}

/// One country's slice of a collector run.
#[derive(Debug, Deserialize, Serialize)]
pub struct CountryNews {
    /// Flag glyph copied from the static country table.
    pub flag: String,
    /// Deduplicated articles, at most the run's `max_results`.
    pub articles: Vec<RawArticle>,
    /// Always equals `articles.len()`.
    pub count: usize,
}

/// The aggregate document written by `noticiero fetch`.
///
/// Countries that yielded zero articles are omitted entirely.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewsArchive {
    /// Local wall-clock timestamp of the run in ISO format.
    pub timestamp: String,
    /// Locale tag the collection targeted.
    pub locale: String,
    pub countries: BTreeMap<String, CountryNews>,
}

/// A Spanish string paired with an English hint.
///
/// The `english` side is a dictionary-derived reading hint, not a
/// translation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Bilingual {
    pub spanish: String,
    pub english: String,
}

/// A vocabulary word surfaced from an article.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VocabularyEntry {
    pub spanish: String,
    pub english: String,
    pub context: String,
}

/// A templated comprehension question about an article.
#[derive(Debug, Deserialize, Serialize)]
pub struct ComprehensionQuestion {
    pub question: Bilingual,
    pub answer: Bilingual,
}

/// A fully transformed article in the shape the NewsReader expects.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderArticle {
    pub title: Bilingual,
    /// `"{source name} - {url}"`.
    pub source: String,
    /// Human-readable date, e.g. `March 15, 2024`, or the raw provider
    /// string when it did not parse.
    pub date: String,
    pub summary: Bilingual,
    /// Sentence pairs; between 1 and 8 entries.
    pub full_text: Vec<Bilingual>,
    /// Between 3 and 5 entries.
    pub key_vocabulary: Vec<VocabularyEntry>,
    /// Always exactly 3 entries.
    pub comprehension_questions: Vec<ComprehensionQuestion>,
}

/// The document written by `noticiero transform`, keyed by country name.
pub type ReaderFeed = BTreeMap<String, Vec<ReaderArticle>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_table_size() {
        assert_eq!(COUNTRIES.len(), 10);
        assert!(COUNTRIES.iter().all(|c| !c.flag.is_empty()));
    }

    #[test]
    fn test_raw_article_missing_keys_default_to_empty() {
        let article: RawArticle = serde_json::from_str(r#"{"title": "Solo título"}"#).unwrap();
        assert_eq!(article.title, "Solo título");
        assert_eq!(article.url, "");
        assert_eq!(article.body, "");
        assert_eq!(article.date, "");
        assert_eq!(article.source, "");
    }

    #[test]
    fn test_news_archive_round_trip() {
        let json = r#"{
            "timestamp": "2024-03-15T10:00:00.000000",
            "locale": "ue-es",
            "countries": {
                "Peru": {
                    "flag": "🇵🇪",
                    "articles": [{"title": "t", "url": "u", "body": "b", "date": "", "source": "s"}],
                    "count": 1
                }
            }
        }"#;

        let archive: NewsArchive = serde_json::from_str(json).unwrap();
        assert_eq!(archive.locale, "ue-es");
        let peru = &archive.countries["Peru"];
        assert_eq!(peru.count, peru.articles.len());
    }

    #[test]
    fn test_reader_article_serializes_camel_case() {
        let article = ReaderArticle {
            title: Bilingual {
                spanish: "Título".to_string(),
                english: "hint".to_string(),
            },
            source: "Fuente - https://example.com".to_string(),
            date: "March 15, 2024".to_string(),
            summary: Bilingual {
                spanish: "Resumen.".to_string(),
                english: "hint".to_string(),
            },
            full_text: vec![],
            key_vocabulary: vec![],
            comprehension_questions: vec![],
        };

        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("\"fullText\""));
        assert!(json.contains("\"keyVocabulary\""));
        assert!(json.contains("\"comprehensionQuestions\""));
        assert!(!json.contains("full_text"));
    }

    #[test]
    fn test_reader_feed_key_order_is_deterministic() {
        let mut feed = ReaderFeed::new();
        feed.insert("Peru".to_string(), vec![]);
        feed.insert("Argentina".to_string(), vec![]);

        let json = serde_json::to_string(&feed).unwrap();
        let argentina = json.find("Argentina").unwrap();
        let peru = json.find("Peru").unwrap();
        assert!(argentina < peru);
    }
}
