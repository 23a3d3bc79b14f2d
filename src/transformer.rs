//! Archive-to-reader-feed transformation.
//!
//! Turns the raw collector archive into the bilingual document the
//! NewsReader front-end consumes. The transformation is a pure function of
//! the input archive and the fixed dictionaries, so re-running it on
//! unchanged input produces byte-identical output.
//!
//! Unlike the collector, failures here are fatal: a missing input file or
//! malformed archive aborts the run.

use crate::lang::{extract_vocabulary, gloss_hint, looks_spanish};
use crate::models::{
    Bilingual, ComprehensionQuestion, NewsArchive, RawArticle, ReaderArticle, ReaderFeed,
};
use crate::outputs;
use crate::utils::{format_publication_date, split_into_sentences, summarize_body};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Articles considered per country before selection.
const SELECTION_POOL: usize = 5;

/// Articles emitted per country.
const ARTICLES_PER_COUNTRY: usize = 3;

/// Sentence pairs emitted per article at most.
const MAX_SENTENCES: usize = 8;

/// Read an archive file, transform it, and write the reader feed.
#[instrument(level = "info", skip_all, fields(input = %input, output = %output))]
pub async fn run(input: &str, output: &str) -> Result<(), Box<dyn Error>> {
    let raw = fs::read_to_string(input).await?;
    let archive: NewsArchive = serde_json::from_str(&raw)?;

    let feed = build_reader_feed(&archive);
    let total_articles: usize = feed.values().map(Vec::len).sum();
    info!(
        countries = feed.len(),
        articles = total_articles,
        "Transformed news archive"
    );

    outputs::write_reader_feed(&feed, output).await?;
    Ok(())
}

/// Transform a whole archive into the reader feed.
pub fn build_reader_feed(archive: &NewsArchive) -> ReaderFeed {
    archive
        .countries
        .iter()
        .map(|(name, country)| {
            let articles = select_articles(&country.articles)
                .into_iter()
                .map(transform_article)
                .collect();
            (name.clone(), articles)
        })
        .collect()
}

/// Pick up to three articles from a country's raw list, preferring ones the
/// Spanish classifier accepts on title or body.
fn select_articles(raw: &[RawArticle]) -> Vec<&RawArticle> {
    let pool = &raw[..raw.len().min(SELECTION_POOL)];
    let (spanish, other): (Vec<&RawArticle>, Vec<&RawArticle>) = pool
        .iter()
        .partition(|a| looks_spanish(&a.title) || looks_spanish(&a.body));

    if spanish.len() >= ARTICLES_PER_COUNTRY {
        spanish.into_iter().take(ARTICLES_PER_COUNTRY).collect()
    } else {
        spanish
            .into_iter()
            .chain(other)
            .take(ARTICLES_PER_COUNTRY)
            .collect()
    }
}

/// Transform one raw article into the reader schema.
fn transform_article(article: &RawArticle) -> ReaderArticle {
    let summary = summarize_body(&article.body);

    ReaderArticle {
        title: Bilingual {
            spanish: article.title.clone(),
            english: gloss_hint(&article.title),
        },
        source: format!("{} - {}", article.source, article.url),
        date: format_publication_date(&article.date),
        summary: Bilingual {
            english: gloss_hint(&summary),
            spanish: summary,
        },
        full_text: build_full_text(&article.body),
        key_vocabulary: extract_vocabulary(&format!("{} {}", article.title, article.body)),
        comprehension_questions: build_questions(article),
    }
}

/// Split a body into glossed sentence pairs.
///
/// A body that looks truncated (trailing ellipsis) or yields fewer than two
/// sentences becomes a single pseudo-sentence equal to the whole body.
fn build_full_text(body: &str) -> Vec<Bilingual> {
    let sentences = split_into_sentences(body);

    if body.ends_with("...") || sentences.len() < 2 {
        return vec![Bilingual {
            spanish: body.to_string(),
            english: gloss_hint(body),
        }];
    }

    sentences
        .into_iter()
        .take(MAX_SENTENCES)
        .map(|sentence| Bilingual {
            english: gloss_hint(&sentence),
            spanish: sentence,
        })
        .collect()
}

/// The three fixed comprehension questions every article receives.
fn build_questions(article: &RawArticle) -> Vec<ComprehensionQuestion> {
    vec![
        ComprehensionQuestion {
            question: Bilingual {
                spanish: "¿Cuál es el tema principal de este artículo?".to_string(),
                english: "What is the main topic of this article?".to_string(),
            },
            answer: Bilingual {
                spanish: format!("El artículo habla sobre: {}", article.title),
                english: format!("The article discusses: {}", article.title),
            },
        },
        ComprehensionQuestion {
            question: Bilingual {
                spanish: "¿De qué fuente viene esta noticia?".to_string(),
                english: "What source does this news come from?".to_string(),
            },
            answer: Bilingual {
                spanish: format!("La noticia viene de {}", article.source),
                english: format!("The news comes from {}", article.source),
            },
        },
        ComprehensionQuestion {
            question: Bilingual {
                spanish: "¿Dónde puedo leer el artículo completo?".to_string(),
                english: "Where can I read the full article?".to_string(),
            },
            answer: Bilingual {
                spanish: format!("Puedes leer el artículo completo en: {}", article.url),
                english: format!("You can read the full article at: {}", article.url),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryNews;
    use std::collections::BTreeMap;

    fn spanish_article(title: &str) -> RawArticle {
        RawArticle {
            title: format!("El gobierno anuncia la reforma {title}"),
            url: format!("https://example.com/{title}"),
            body: "El presidente anunció una reforma importante para el país. \
                   La economía nacional mostró señales de crecimiento este año. \
                   Los ciudadanos esperan mejoras en la seguridad pública."
                .to_string(),
            date: "2024-03-15T10:00:00+00:00".to_string(),
            source: "El Diario".to_string(),
        }
    }

    fn english_article() -> RawArticle {
        RawArticle {
            title: "Breaking headline".to_string(),
            url: "https://example.com/en".to_string(),
            body: "Short update from abroad without any markers.".to_string(),
            date: String::new(),
            source: "Daily Post".to_string(),
        }
    }

    fn archive_with(articles: Vec<RawArticle>) -> NewsArchive {
        let mut countries = BTreeMap::new();
        countries.insert(
            "Chile".to_string(),
            CountryNews {
                flag: "🇨🇱".to_string(),
                count: articles.len(),
                articles,
            },
        );
        NewsArchive {
            timestamp: "2024-03-15T10:00:00.000000".to_string(),
            locale: "ue-es".to_string(),
            countries,
        }
    }

    #[test]
    fn test_selection_prefers_spanish_articles() {
        let raw = vec![
            english_article(),
            spanish_article("uno"),
            spanish_article("dos"),
            spanish_article("tres"),
            spanish_article("cuatro"),
        ];
        let selected = select_articles(&raw);

        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|a| a.title.starts_with("El gobierno")));
    }

    #[test]
    fn test_selection_backfills_with_non_spanish() {
        let raw = vec![english_article(), spanish_article("uno"), english_article()];
        let selected = select_articles(&raw);

        assert_eq!(selected.len(), 3);
        // Spanish article comes first despite its position in the input.
        assert!(selected[0].title.starts_with("El gobierno"));
    }

    #[test]
    fn test_selection_pool_is_capped_at_five() {
        let raw: Vec<RawArticle> = (0..8).map(|i| spanish_article(&i.to_string())).collect();
        let selected = select_articles(&raw);
        assert_eq!(selected.len(), 3);
        assert!(selected[0].title.ends_with('0'));
    }

    #[test]
    fn test_transform_article_shape() {
        let article = transform_article(&spanish_article("uno"));

        assert_eq!(article.full_text.len(), 3);
        assert_eq!(article.comprehension_questions.len(), 3);
        assert!(article.key_vocabulary.len() >= 3 && article.key_vocabulary.len() <= 5);
        assert_eq!(article.date, "March 15, 2024");
        assert_eq!(article.source, "El Diario - https://example.com/uno");
        assert!(article.summary.spanish.ends_with('.'));
        assert!(!article.title.english.is_empty());
    }

    #[test]
    fn test_truncated_body_becomes_single_pseudo_sentence() {
        let body = "El gobierno anunció nuevas medidas económicas y sociales...";
        let full_text = build_full_text(body);

        assert_eq!(full_text.len(), 1);
        assert_eq!(full_text[0].spanish, body);
        assert!(!full_text[0].english.is_empty());
    }

    #[test]
    fn test_single_sentence_body_becomes_pseudo_sentence() {
        let body = "El presidente habló brevemente ante la prensa nacional.";
        let full_text = build_full_text(body);

        assert_eq!(full_text.len(), 1);
        assert_eq!(full_text[0].spanish, body);
    }

    #[test]
    fn test_full_text_caps_at_eight_sentences() {
        let body = (0..12)
            .map(|i| format!("Esta es la frase número {i} del cuerpo."))
            .collect::<Vec<_>>()
            .join(" ");
        let full_text = build_full_text(&body);

        assert_eq!(full_text.len(), 8);
    }

    #[test]
    fn test_questions_interpolate_article_fields() {
        let questions = build_questions(&spanish_article("uno"));

        assert_eq!(questions.len(), 3);
        assert!(questions[0].answer.spanish.contains("El gobierno anuncia"));
        assert!(questions[1].answer.english.contains("El Diario"));
        assert!(questions[2].answer.spanish.contains("https://example.com/uno"));
    }

    #[test]
    fn test_unparsable_date_passes_through() {
        let mut raw = spanish_article("uno");
        raw.date = "hace 2 horas".to_string();
        let article = transform_article(&raw);
        assert_eq!(article.date, "hace 2 horas");
    }

    #[test]
    fn test_build_reader_feed_is_deterministic() {
        let archive = archive_with(vec![
            spanish_article("uno"),
            spanish_article("dos"),
            english_article(),
        ]);

        let first = serde_json::to_string_pretty(&build_reader_feed(&archive)).unwrap();
        let second = serde_json::to_string_pretty(&build_reader_feed(&archive)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_reader_feed_caps_per_country() {
        let archive = archive_with((0..5).map(|i| spanish_article(&i.to_string())).collect());
        let feed = build_reader_feed(&archive);
        assert_eq!(feed["Chile"].len(), 3);
    }
}
