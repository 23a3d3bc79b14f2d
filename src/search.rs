//! DuckDuckGo news-search client.
//!
//! The provider's news endpoint requires a two-step exchange:
//!
//! 1. Fetch the HTML search page for the query and scrape the `vqd` request
//!    token out of it
//! 2. Call `news.js` with the token, the query, a region tag, and a
//!    safesearch level, which returns JSON records
//!
//! Provider records guarantee no schema; any key may be absent and defaults
//! to an empty value. Records are normalized into [`SearchResult`] with the
//! epoch publication date rendered as an RFC 3339 string.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const SEARCH_PAGE_URL: &str = "https://duckduckgo.com/";
const NEWS_ENDPOINT: &str = "https://duckduckgo.com/news.js";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; noticiero/0.1)";

static VQD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"vqd=['"]?([\d-]+)"#).unwrap());

/// Safesearch level passed to the provider.
#[derive(Debug, Clone, Copy)]
pub enum SafeSearch {
    On,
    Moderate,
    Off,
}

impl SafeSearch {
    fn as_param(self) -> &'static str {
        match self {
            SafeSearch::On => "1",
            SafeSearch::Moderate => "-1",
            SafeSearch::Off => "-2",
        }
    }
}

/// A normalized news-search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub body: String,
    /// RFC 3339 publication timestamp, or empty when the provider sent none.
    pub date: String,
    pub source: String,
}

/// Raw provider record; every key may be absent.
#[derive(Debug, Deserialize)]
struct ProviderResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    excerpt: String,
    /// Publication time as epoch seconds.
    #[serde(default)]
    date: Option<i64>,
    #[serde(default)]
    source: String,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    results: Vec<ProviderResult>,
}

impl From<ProviderResult> for SearchResult {
    fn from(raw: ProviderResult) -> Self {
        let date = raw
            .date
            .and_then(|epoch| DateTime::<Utc>::from_timestamp(epoch, 0))
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, false))
            .unwrap_or_default();

        SearchResult {
            title: raw.title,
            url: raw.url,
            body: raw.excerpt,
            date,
            source: raw.source,
        }
    }
}

/// HTTP client for the provider's news endpoint.
pub struct NewsSearchClient {
    http: Client,
}

impl NewsSearchClient {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    /// Run one news query against the provider.
    ///
    /// Returns at most `max_results` normalized records. Any transport or
    /// parse failure surfaces as an error for the caller to handle; this
    /// client performs no retries.
    #[instrument(level = "debug", skip(self))]
    pub async fn news(
        &self,
        query: &str,
        region: &str,
        safesearch: SafeSearch,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, Box<dyn Error>> {
        let vqd = self.request_vqd(query).await?;

        let url = Url::parse_with_params(
            NEWS_ENDPOINT,
            &[
                ("l", region),
                ("o", "json"),
                ("noamp", "1"),
                ("q", query),
                ("vqd", &vqd),
                ("p", safesearch.as_param()),
            ],
        )?;

        let response: ProviderResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut results: Vec<SearchResult> =
            response.results.into_iter().map(SearchResult::from).collect();
        results.truncate(max_results);

        debug!(query, region, count = results.len(), "News query returned");
        Ok(results)
    }

    /// Fetch the search page and scrape the `vqd` token required by the
    /// news endpoint.
    async fn request_vqd(&self, query: &str) -> Result<String, Box<dyn Error>> {
        let page_url = format!(
            "{}?q={}&iar=news",
            SEARCH_PAGE_URL,
            urlencoding::encode(query)
        );
        let html = self
            .http
            .get(&page_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        extract_vqd(&html).ok_or_else(|| format!("no vqd token in search page for {query:?}").into())
    }
}

fn extract_vqd(html: &str) -> Option<String> {
    VQD_RE
        .captures(html)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safesearch_params() {
        assert_eq!(SafeSearch::On.as_param(), "1");
        assert_eq!(SafeSearch::Moderate.as_param(), "-1");
        assert_eq!(SafeSearch::Off.as_param(), "-2");
    }

    #[test]
    fn test_extract_vqd_from_page() {
        let html = r#"... nrj('/d.js?q=test&vqd=4-123456789012345678901234567890&l=es-es') ..."#;
        assert_eq!(
            extract_vqd(html),
            Some("4-123456789012345678901234567890".to_string())
        );
        assert_eq!(extract_vqd("<html>nothing here</html>"), None);
    }

    #[test]
    fn test_provider_result_normalization() {
        let json = r#"{
            "results": [
                {"date": 1710496800, "title": "Título", "url": "https://example.com/a",
                 "excerpt": "Cuerpo del artículo", "source": "El Diario"},
                {"title": "Sin fecha"}
            ]
        }"#;

        let response: ProviderResponse = serde_json::from_str(json).unwrap();
        let results: Vec<SearchResult> =
            response.results.into_iter().map(SearchResult::from).collect();

        assert_eq!(results[0].date, "2024-03-15T10:00:00+00:00");
        assert_eq!(results[0].body, "Cuerpo del artículo");
        assert_eq!(results[0].source, "El Diario");

        assert_eq!(results[1].title, "Sin fecha");
        assert_eq!(results[1].date, "");
        assert_eq!(results[1].url, "");
    }
}
