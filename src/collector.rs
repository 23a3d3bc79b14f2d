//! Per-country news collection.
//!
//! For each country the collector walks a bounded grid of query phrasings
//! and provider regions, keeping results that pass the Spanish filter,
//! deduplicating by exact title, and stopping as soon as the per-country cap
//! is reached. Every attempt yields an explicit `Result`; failed attempts
//! are logged and skipped, so a country degrades to fewer (or zero)
//! articles rather than failing the run.

use crate::lang::passes_collector_filter;
use crate::models::{COUNTRIES, Country, CountryNews, NewsArchive, RawArticle};
use crate::search::{NewsSearchClient, SafeSearch, SearchResult};
use crate::utils::truncate_for_log;
use chrono::Local;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Provider regions tried for every query phrasing, most specific first.
const SEARCH_REGIONS: [&str; 4] = ["es-es", "es-mx", "es-ar", "wt-wt"];

/// Results requested from the provider per attempt.
const PROVIDER_PAGE_SIZE: usize = 5;

/// Locale tag recorded in the archive.
const LOCALE: &str = "ue-es";

/// The query phrasings tried for a country, in priority order.
fn country_queries(name: &str) -> [String; 5] {
    [
        format!("noticias de {name}"),
        format!("{name} actualidad"),
        format!("últimas noticias {name}"),
        format!("política {name}"),
        format!("economía {name}"),
    ]
}

/// Fold one attempt's results into the running article list.
///
/// Applies the Spanish filter to the combined title and body, drops exact
/// title duplicates, and stops once `max_results` articles are held.
fn merge_results(articles: &mut Vec<RawArticle>, results: Vec<SearchResult>, max_results: usize) {
    for result in results {
        if articles.len() >= max_results {
            break;
        }
        if !passes_collector_filter(&format!("{} {}", result.title, result.body)) {
            continue;
        }
        if articles.iter().any(|a| a.title == result.title) {
            continue;
        }

        debug!(
            title = %result.title,
            body = %truncate_for_log(&result.body, 120),
            "Admitted article"
        );
        articles.push(RawArticle {
            title: result.title,
            url: result.url,
            body: result.body,
            date: result.date,
            source: result.source,
        });
    }
}

/// Fetch up to `max_results` Spanish news articles for one country.
///
/// Attempts every query phrasing across every region until the cap is
/// reached. Provider failures are logged per attempt and never abort the
/// country.
#[instrument(level = "info", skip(client))]
pub async fn fetch_country_news(
    client: &NewsSearchClient,
    country: &str,
    max_results: usize,
) -> Vec<RawArticle> {
    let mut articles: Vec<RawArticle> = Vec::new();

    'queries: for query in country_queries(country) {
        if articles.len() >= max_results {
            break;
        }
        for region in SEARCH_REGIONS {
            if articles.len() >= max_results {
                break 'queries;
            }
            match client
                .news(&query, region, SafeSearch::Moderate, PROVIDER_PAGE_SIZE)
                .await
            {
                Ok(results) => merge_results(&mut articles, results, max_results),
                Err(e) => {
                    debug!(%query, region, error = %e, "Search attempt failed; trying next combination");
                }
            }
        }
    }

    articles.truncate(max_results);
    articles
}

/// Assemble the archive from per-country fetch results.
///
/// Countries yielding zero articles are reported and omitted; every kept
/// entry records `count` equal to its article list length.
fn build_archive(per_country: Vec<(Country, Vec<RawArticle>)>) -> NewsArchive {
    let mut countries = BTreeMap::new();

    for (country, articles) in per_country {
        if articles.is_empty() {
            warn!(country = country.name, "No articles found");
            continue;
        }

        info!(country = country.name, count = articles.len(), "Collected articles");
        countries.insert(
            country.name.to_string(),
            CountryNews {
                flag: country.flag.to_string(),
                count: articles.len(),
                articles,
            },
        );
    }

    NewsArchive {
        timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        locale: LOCALE.to_string(),
        countries,
    }
}

/// Run the collector for every country in the static table.
#[instrument(level = "info", skip(client))]
pub async fn collect_all(client: &NewsSearchClient, max_results: usize) -> NewsArchive {
    let mut per_country = Vec::with_capacity(COUNTRIES.len());

    for country in COUNTRIES {
        info!(country = country.name, flag = country.flag, "Fetching country news");
        let articles = fetch_country_news(client, country.name, max_results).await;
        per_country.push((country, articles));
    }

    build_archive(per_country)
}
